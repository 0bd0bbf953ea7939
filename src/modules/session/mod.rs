pub mod crud;
pub mod locks;
pub mod model;
