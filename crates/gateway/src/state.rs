//! Shared application state for the gateway

use fitness_database::{DatabaseConfig, MemberRepository, WorkoutRepository};
use sqlx::SqlitePool;

use crate::error::{GatewayError, GatewayResult};

/// Repositories handed to every request handler. Nothing here is mutated
/// after construction; each repository call checks out its own connection.
#[derive(Clone)]
pub struct GatewayState {
    pub members: MemberRepository,
    pub workouts: WorkoutRepository,
}

impl GatewayState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            members: MemberRepository::new(pool.clone()),
            workouts: WorkoutRepository::new(pool),
        }
    }

    /// Create gateway state from database configuration, running migrations first.
    pub async fn from_config(config: &DatabaseConfig) -> GatewayResult<Self> {
        let pool = fitness_database::initialize_database(config)
            .await
            .map_err(|e| GatewayError::Database(format!("Failed to initialize database: {e}")))?;

        Ok(Self::new(pool))
    }
}
