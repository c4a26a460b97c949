//! In-process session store.
//!
//! Keeps the same encoded blobs the database would, so codec behavior
//! (including corrupt-record masking) is identical across backends.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;

use super::sessions::{decode_from_store, encode_for_store, SessionStore, StoredSession};
use crate::domain::session_id::SessionId;
use crate::domain::snapshot::Snapshot;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Debug, Clone)]
struct Record {
    blob: Vec<u8>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    version: i32,
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: Mutex<HashMap<String, Record>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Overwrite the stored blob for `id` without encoding, keeping or
    /// creating the record at version 1.
    pub fn put_raw(&self, id: &SessionId, blob: Vec<u8>) {
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock();
        let record = records.entry(id.as_str().to_owned()).or_insert(Record {
            blob: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 1,
        });
        record.blob = blob;
        record.updated_at = now;
    }

    /// Current version of the record, if any.
    pub fn version_of(&self, id: &SessionId) -> Option<i32> {
        self.records.lock().get(id.as_str()).map(|r| r.version)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<StoredSession>, DomainError> {
        let record = self.records.lock().get(id.as_str()).cloned();
        Ok(record.and_then(|record| {
            let snapshot = decode_from_store(id, &record.blob)?;
            Some(StoredSession {
                snapshot,
                version: record.version,
                created_at: record.created_at,
                updated_at: record.updated_at,
            })
        }))
    }

    async fn save(
        &self,
        id: &SessionId,
        snapshot: &Snapshot,
        expected_version: Option<i32>,
    ) -> Result<StoredSession, DomainError> {
        let blob = encode_for_store(snapshot)?;
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock();

        let record = if let Some(existing) = records.get_mut(id.as_str()) {
            if let Some(expected) = expected_version.filter(|v| *v != existing.version) {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Session was modified concurrently (expected version {expected}, actual version {}). Reload and retry.",
                        existing.version
                    ),
                ));
            }
            existing.blob = blob;
            existing.updated_at = now;
            existing.version += 1;
            existing.clone()
        } else if expected_version.is_some() {
            return Err(DomainError::not_found(
                NotFoundKind::Session,
                format!("Session {id} not found"),
            ));
        } else {
            let record = Record {
                blob,
                created_at: now,
                updated_at: now,
                version: 1,
            };
            records.insert(id.as_str().to_owned(), record.clone());
            record
        };

        Ok(StoredSession {
            snapshot: snapshot.clone(),
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.records.lock().remove(id.as_str()).is_some())
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.records.lock().contains_key(id.as_str()))
    }
}
