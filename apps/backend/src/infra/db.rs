use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

use crate::config::db::{db_url, DbKind, DbOwner, DbProfile};
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum DbSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    Connect(DbErr),
    #[error("migration failed: {0}")]
    Migrate(DbErr),
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .acquire_timeout(Duration::from_secs(5));

    match kind {
        // Each connection to `sqlite::memory:` is its own database
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(4);
        }
        DbKind::Postgres => {
            opts.max_connections(10).min_connections(1);
        }
    }
    opts
}

/// Unified database connector for every backend, profile and owner.
/// This function does NOT run any migrations
pub async fn connect_db(
    kind: DbKind,
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbSetupError> {
    let url = db_url(kind, profile, owner)?;
    let conn = Database::connect(connect_options(kind, url))
        .await
        .map_err(DbSetupError::Connect)?;
    info!(db = kind.as_str(), ?profile, ?owner, "database connected");
    Ok(conn)
}

/// Connect, bring the schema up to date, and return a pool for the app role.
///
/// Postgres migrates through the owner role and then reconnects as the app
/// role; SQLite uses a single connection for both.
pub async fn bootstrap_db(
    kind: DbKind,
    profile: DbProfile,
) -> Result<DatabaseConnection, DbSetupError> {
    match kind {
        DbKind::Postgres => {
            let owner = connect_db(kind, profile, DbOwner::Owner).await?;
            migrate(&owner, MigrationCommand::Up)
                .await
                .map_err(DbSetupError::Migrate)?;
            owner.close().await.map_err(DbSetupError::Connect)?;
            connect_db(kind, profile, DbOwner::App).await
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let conn = connect_db(kind, profile, DbOwner::Owner).await?;
            migrate(&conn, MigrationCommand::Up)
                .await
                .map_err(DbSetupError::Migrate)?;
            Ok(conn)
        }
    }
}
