//! Fitness Database Crate
//!
//! Store bootstrap (connection pool, embedded migrations) and the member and
//! workout repositories that run one statement per operation against it.

use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use fitness_config::DatabaseConfig;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{
    MemberRepository, WorkoutRepository, MEMBER_NOT_FOUND, NO_WORKOUTS_FOR_MEMBER,
    WORKOUT_NOT_FOUND,
};

pub use entities::{Member, NewMember, NewWorkout, Workout, WorkoutChanges};

pub use types::{DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
