//! Session services: the controller and the store cache.

pub mod session_cache;
pub mod session_controller;

pub use session_cache::SessionCache;
pub use session_controller::SessionController;
