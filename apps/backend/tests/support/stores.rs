//! Store fixtures: a SQLite-backed store and a wrapper that can fail writes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use blackjack_backend::errors::domain::InfraErrorKind;
use blackjack_backend::{
    bootstrap_db, DbKind, DbProfile, DomainError, MemorySessionStore, SeaSessionStore,
    SessionId, SessionStore, Snapshot, StoredSession,
};
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the schema applied.
pub async fn sqlite_store() -> SeaSessionStore {
    sqlite_store_with_conn().await.0
}

/// Like [`sqlite_store`], also handing back a connection to the same database
/// for writing rows behind the store's back.
pub async fn sqlite_store_with_conn() -> (SeaSessionStore, DatabaseConnection) {
    let conn = bootstrap_db(DbKind::SqliteMemory, DbProfile::Test)
        .await
        .expect("bootstrap in-memory sqlite");
    (SeaSessionStore::new(conn.clone()), conn)
}

/// Delegates to an inner store; `fail_saves(true)` makes every save report
/// the database as unavailable without touching the inner store.
pub struct FailingStore<S> {
    inner: S,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl<S: SessionStore> FailingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_saves: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Save attempts, failed ones included.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl FailingStore<MemorySessionStore> {
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self::new(MemorySessionStore::new()))
    }
}

#[async_trait]
impl<S: SessionStore> SessionStore for FailingStore<S> {
    async fn load(&self, id: &SessionId) -> Result<Option<StoredSession>, DomainError> {
        self.inner.load(id).await
    }

    async fn save(
        &self,
        id: &SessionId,
        snapshot: &Snapshot,
        expected_version: Option<i32>,
    ) -> Result<StoredSession, DomainError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::infra(
                InfraErrorKind::DbUnavailable,
                "Database unavailable",
            ));
        }
        self.inner.save(id, snapshot, expected_version).await
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        self.inner.delete(id).await
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        self.inner.exists(id).await
    }
}
