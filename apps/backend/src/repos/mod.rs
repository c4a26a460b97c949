//! Session persistence.

pub mod memory;
pub mod sea;
pub mod sessions;

pub use memory::MemorySessionStore;
pub use sea::SeaSessionStore;
pub use sessions::{SessionStore, StoredSession};
