//! The persisted unit of a session.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::state::EngineState;

/// Bookkeeping carried alongside the engine state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub actions_dispatched: u64,
    #[serde(default)]
    pub rounds_played: u64,
}

impl SessionMetadata {
    pub fn new(created_at: OffsetDateTime) -> Self {
        Self {
            created_at,
            actions_dispatched: 0,
            rounds_played: 0,
        }
    }
}

/// Everything needed to rebuild a session: engine state, ledger balance and
/// metadata.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub engine_state: EngineState,
    pub money: i64,
    pub metadata: SessionMetadata,
}
