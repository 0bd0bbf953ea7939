use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::model::SessionId;

/// Hands out one async mutex per session id so that load, upstream call and
/// save for the same session never interleave.
#[derive(Clone, Default)]
pub struct SessionLocks {
    inner: Arc<Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, id: &SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            // Drop locks nobody holds or waits on.
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub fn tracked(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_session_is_serialized() {
        let locks = SessionLocks::new();
        let id = SessionId::parse("s1").unwrap();

        let guard = locks.acquire(&id).await;

        let waiter = {
            let locks = locks.clone();
            let id = id.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn different_sessions_do_not_block() {
        let locks = SessionLocks::new();
        let a = SessionId::parse("a").unwrap();
        let b = SessionId::parse("b").unwrap();

        let _guard_a = locks.acquire(&a).await;
        tokio::time::timeout(Duration::from_secs(1), locks.acquire(&b))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn released_locks_are_pruned() {
        let locks = SessionLocks::new();
        for raw in ["a", "b", "c"] {
            let id = SessionId::parse(raw).unwrap();
            drop(locks.acquire(&id).await);
        }
        // Only the most recently inserted entry survives the last prune.
        assert_eq!(locks.tracked(), 1);
    }
}
