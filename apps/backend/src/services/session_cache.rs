//! Process-local read-through cache in front of a session store.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::config::session::CacheConfig;
use crate::domain::session_id::SessionId;
use crate::domain::snapshot::Snapshot;
use crate::errors::domain::DomainError;
use crate::repos::sessions::{SessionStore, StoredSession};

/// Caches immutable `StoredSession` values keyed by session id.
///
/// Only authoritative within one process: every write still goes to the
/// inner store with its version token, so a writer elsewhere surfaces as a
/// conflict rather than being hidden by a stale entry.
pub struct SessionCache {
    inner: Arc<dyn SessionStore>,
    entries: Cache<String, Arc<StoredSession>>,
}

impl SessionCache {
    pub fn new(inner: Arc<dyn SessionStore>, config: CacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl)
            .build();
        Self { inner, entries }
    }

    /// Cached entry, or load from the inner store and populate.
    ///
    /// A write that lands while the load is in flight wins over the loaded
    /// value.
    pub async fn get(&self, id: &SessionId) -> Result<Option<StoredSession>, DomainError> {
        if let Some(entry) = self.entries.get(id.as_str()).await {
            debug!(session_id = %id, version = entry.version, "session cache hit");
            return Ok(Some(StoredSession::clone(&entry)));
        }

        let Some(loaded) = self.inner.load(id).await? else {
            return Ok(None);
        };
        let entry = self
            .entries
            .entry(id.as_str().to_owned())
            .or_insert_with(async { Arc::new(loaded) })
            .await;
        Ok(Some(StoredSession::clone(entry.value())))
    }

    pub async fn put(&self, id: &SessionId, entry: StoredSession) {
        self.entries
            .insert(id.as_str().to_owned(), Arc::new(entry))
            .await;
    }

    pub async fn invalidate(&self, id: &SessionId) {
        self.entries.invalidate(id.as_str()).await;
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.entries.contains_key(id.as_str())
    }
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn load(&self, id: &SessionId) -> Result<Option<StoredSession>, DomainError> {
        self.get(id).await
    }

    async fn save(
        &self,
        id: &SessionId,
        snapshot: &Snapshot,
        expected_version: Option<i32>,
    ) -> Result<StoredSession, DomainError> {
        match self.inner.save(id, snapshot, expected_version).await {
            Ok(stored) => {
                self.put(id, stored.clone()).await;
                Ok(stored)
            }
            Err(e) => {
                // Stored version is unknown after a failed write
                self.invalidate(id).await;
                debug!(session_id = %id, error = %e, "session cache invalidated after failed save");
                Err(e)
            }
        }
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        self.invalidate(id).await;
        self.inner.delete(id).await
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        if self.contains(id) {
            return Ok(true);
        }
        self.inner.exists(id).await
    }
}
