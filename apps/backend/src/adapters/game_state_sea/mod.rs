//! SeaORM adapter for session records - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::game_state;

pub mod dto;

pub use dto::GameStateWrite;

// Adapter functions return DbErr; the store maps to DomainError via map_db_err.

/// Helper: compare-and-swap update of a session blob, then refetch.
///
/// - Bumps version and updated_at alongside the new blob
/// - Filters by id and the caller's expected version
/// - Checks rows_affected to distinguish NotFound vs OptimisticLock
async fn optimistic_update_then_fetch<C>(
    conn: &C,
    id: &str,
    expected_version: i32,
    compressed_state: Vec<u8>,
) -> Result<game_state::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
{
    let now = time::OffsetDateTime::now_utc();

    let result = game_state::Entity::update_many()
        .col_expr(
            game_state::Column::CompressedState,
            Expr::val(compressed_state).into(),
        )
        .col_expr(game_state::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_state::Column::Version,
            Expr::col(game_state::Column::Version).add(1),
        )
        .filter(game_state::Column::Id.eq(id))
        .filter(game_state::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let current = find_by_id(conn, id).await?;
        if let Some(current) = current {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                expected_version, current.version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::Custom(format!("SESSION_NOT_FOUND:{id}")));
        }
    }

    require_session(conn, id).await
}

/// Insert, or replace the blob of an existing row keeping its created_at.
async fn upsert_then_fetch<C>(
    conn: &C,
    id: &str,
    compressed_state: Vec<u8>,
) -> Result<game_state::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
{
    let now = time::OffsetDateTime::now_utc();
    let row = game_state::ActiveModel {
        id: Set(id.to_owned()),
        compressed_state: Set(compressed_state),
        created_at: Set(now),
        updated_at: Set(now),
        version: Set(1),
    };

    let on_conflict = OnConflict::column(game_state::Column::Id)
        .update_columns([
            game_state::Column::CompressedState,
            game_state::Column::UpdatedAt,
        ])
        .value(
            game_state::Column::Version,
            Expr::col((game_state::Entity, game_state::Column::Version)).add(1),
        )
        .to_owned();

    game_state::Entity::insert(row)
        .on_conflict(on_conflict)
        .exec_without_returning(conn)
        .await?;

    require_session(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<game_state::Model>, sea_orm::DbErr> {
    game_state::Entity::find_by_id(id.to_owned()).one(conn).await
}

/// Find a session row or return a structured not-found error.
pub async fn require_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<game_state::Model, sea_orm::DbErr> {
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("SESSION_NOT_FOUND:{id}")))
}

pub async fn write<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameStateWrite,
) -> Result<game_state::Model, sea_orm::DbErr> {
    match dto.expected_version {
        Some(version) => {
            optimistic_update_then_fetch(conn, &dto.id, version, dto.compressed_state).await
        }
        None => upsert_then_fetch(conn, &dto.id, dto.compressed_state).await,
    }
}

/// Returns true when a row was removed.
pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<bool, sea_orm::DbErr> {
    let result = game_state::Entity::delete_many()
        .filter(game_state::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<bool, sea_orm::DbErr> {
    Ok(find_by_id(conn, id).await?.is_some())
}
