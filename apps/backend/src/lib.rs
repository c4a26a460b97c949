#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod codec;
pub mod config;
pub mod domain;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod repos;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use codec::CodecError;
pub use config::db::{db_url, DbKind, DbOwner, DbProfile};
pub use config::session::{CacheConfig, SessionConfig};
pub use config::ConfigError;
pub use domain::{Action, Position, PublicState, RuleOverrides, SessionId, SideBets, Snapshot, Stage};
pub use engine::{RuleEngine, Transition};
pub use errors::{DomainError, ErrorCode};
pub use infra::db::{bootstrap_db, connect_db, DbSetupError};
pub use repos::{MemorySessionStore, SeaSessionStore, SessionStore, StoredSession};
pub use services::{SessionCache, SessionController};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
