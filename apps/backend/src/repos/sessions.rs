//! Store contract shared by every session backend.

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::warn;

use crate::codec::{self, CodecError};
use crate::domain::session_id::SessionId;
use crate::domain::snapshot::Snapshot;
use crate::errors::domain::{DomainError, InfraErrorKind, StateKind};

/// A snapshot as read back from storage, with its record bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub snapshot: Snapshot,
    /// Optimistic concurrency token; starts at 1 and grows by one per write.
    pub version: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Durable key-value persistence of session snapshots.
///
/// `save` with `expected_version: None` is an unconditional upsert: a new
/// record starts at version 1, an existing one keeps `created_at` and gets
/// version + 1. With `Some(v)` the write only lands when the record is still
/// at `v`; otherwise it fails with `Conflict(OptimisticLock)`, or
/// `NotFound(Session)` when the record is gone.
///
/// `load` reports a record whose blob cannot be decoded as absent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: &SessionId) -> Result<Option<StoredSession>, DomainError>;

    async fn save(
        &self,
        id: &SessionId,
        snapshot: &Snapshot,
        expected_version: Option<i32>,
    ) -> Result<StoredSession, DomainError>;

    /// Returns true when a record was removed.
    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError>;

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError>;
}

/// Encode for storage, mapping codec failures into domain errors.
pub(crate) fn encode_for_store(snapshot: &Snapshot) -> Result<Vec<u8>, DomainError> {
    codec::encode(snapshot).map_err(|e| match e {
        CodecError::NotPersistable(stage) => DomainError::state(
            StateKind::NotPersistable,
            format!("refusing to persist stage {stage}"),
        ),
        other => DomainError::infra(InfraErrorKind::Other("Codec".into()), other.to_string()),
    })
}

/// Decode a stored blob; corrupt data is logged and treated as absent.
pub(crate) fn decode_from_store(id: &SessionId, bytes: &[u8]) -> Option<Snapshot> {
    match codec::decode(bytes) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(session_id = %id, error = %e, "Discarding unreadable session snapshot");
            None
        }
    }
}
