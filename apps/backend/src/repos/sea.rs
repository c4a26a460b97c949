//! SeaORM-backed session store (Postgres or SQLite).

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::debug;

use super::sessions::{decode_from_store, encode_for_store, SessionStore, StoredSession};
use crate::adapters::game_state_sea::{self as game_state_adapter, GameStateWrite};
use crate::domain::session_id::SessionId;
use crate::domain::snapshot::Snapshot;
use crate::entities::game_state;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

#[derive(Debug, Clone)]
pub struct SeaSessionStore {
    conn: DatabaseConnection,
}

impl SeaSessionStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn stored(snapshot: Snapshot, row: game_state::Model) -> StoredSession {
    StoredSession {
        snapshot,
        version: row.version,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl SessionStore for SeaSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<StoredSession>, DomainError> {
        let row = game_state_adapter::find_by_id(&self.conn, id.as_str())
            .await
            .map_err(map_db_err)?;

        Ok(row.and_then(|row| {
            let snapshot = decode_from_store(id, &row.compressed_state)?;
            Some(stored(snapshot, row))
        }))
    }

    async fn save(
        &self,
        id: &SessionId,
        snapshot: &Snapshot,
        expected_version: Option<i32>,
    ) -> Result<StoredSession, DomainError> {
        let bytes = encode_for_store(snapshot)?;
        let mut dto = GameStateWrite::upsert(id.as_str(), bytes);
        if let Some(version) = expected_version {
            dto = dto.expecting(version);
        }

        let row = game_state_adapter::write(&self.conn, dto)
            .await
            .map_err(map_db_err)?;
        debug!(session_id = %id, version = row.version, "session saved");
        Ok(stored(snapshot.clone(), row))
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        game_state_adapter::delete_by_id(&self.conn, id.as_str())
            .await
            .map_err(map_db_err)
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        game_state_adapter::exists(&self.conn, id.as_str())
            .await
            .map_err(map_db_err)
    }
}
