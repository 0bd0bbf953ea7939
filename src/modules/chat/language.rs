/// Which system instruction opens a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPromptVariant {
    English,
    German,
}

impl SystemPromptVariant {
    pub fn instruction(self) -> &'static str {
        match self {
            SystemPromptVariant::English => {
                "You are a helpful assistant. Always answer in English."
            }
            SystemPromptVariant::German => {
                "Du bist ein hilfreicher Assistent. Antworte immer auf Deutsch."
            }
        }
    }
}

/// Picks the system prompt for the first message of a session.
pub type LanguageDetector = fn(&str) -> SystemPromptVariant;

const ENGLISH_MARKERS: &[&str] = &[
    "hello", "please", "what", "how", "can you", "explain", "tell me", "who", "where", "why",
    "english",
];

/// English if the text contains any marker word (case-insensitive substring
/// match), German otherwise.
pub fn detect_by_marker_words(text: &str) -> SystemPromptVariant {
    let lowered = text.to_lowercase();
    if ENGLISH_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        SystemPromptVariant::English
    } else {
        SystemPromptVariant::German
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_markers_select_english() {
        assert_eq!(detect_by_marker_words("How does this work?"), SystemPromptVariant::English);
        assert_eq!(detect_by_marker_words("CAN YOU help"), SystemPromptVariant::English);
        assert_eq!(detect_by_marker_words("answer in English"), SystemPromptVariant::English);
    }

    #[test]
    fn no_marker_selects_german() {
        assert_eq!(detect_by_marker_words("Wie spät ist es?"), SystemPromptVariant::German);
        assert_eq!(detect_by_marker_words("Guten Morgen"), SystemPromptVariant::German);
    }

    #[test]
    fn markers_match_inside_words() {
        // "show" contains "how"; the heuristic is a plain substring check.
        assert_eq!(detect_by_marker_words("zeig mir die show"), SystemPromptVariant::English);
    }
}
