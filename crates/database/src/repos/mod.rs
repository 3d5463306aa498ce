//! Database repository implementations
//!
//! Every repository call checks a connection out of the pool for the length of
//! that call only. The guard returns it on drop, whichever way the call exits.

pub mod member_repository;
pub mod workout_repository;

pub use member_repository::*;
pub use workout_repository::*;

use crate::types::{DatabaseError, DatabaseResult};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};

async fn acquire(pool: &SqlitePool) -> DatabaseResult<PoolConnection<Sqlite>> {
    pool.acquire()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
}
