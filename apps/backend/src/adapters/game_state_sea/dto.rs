//! DTOs for game_state_sea adapter.

/// DTO for writing a session blob.
///
/// `expected_version: None` upserts unconditionally; `Some(v)` only succeeds
/// when the stored row is still at version `v`.
#[derive(Debug, Clone)]
pub struct GameStateWrite {
    pub id: String,
    pub compressed_state: Vec<u8>,
    pub expected_version: Option<i32>,
}

impl GameStateWrite {
    pub fn upsert(id: impl Into<String>, compressed_state: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            compressed_state,
            expected_version: None,
        }
    }

    pub fn expecting(mut self, version: i32) -> Self {
        self.expected_version = Some(version);
        self
    }
}
