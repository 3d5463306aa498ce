//! Repository for workout data access operations.

use super::acquire;
use crate::entities::{NewWorkout, Workout, WorkoutChanges};
use crate::types::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

pub const WORKOUT_NOT_FOUND: &str = "Workout not found";
pub const NO_WORKOUTS_FOR_MEMBER: &str = "No workouts found for this member";

/// Repository for workout database operations
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: SqlitePool,
}

impl WorkoutRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a workout and return it with the id the store assigned.
    ///
    /// The member reference is not checked here; the store's foreign key
    /// rejects unknown members.
    pub async fn create(&self, workout: NewWorkout) -> DatabaseResult<Workout> {
        let mut conn = acquire(&self.pool).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO workouts (member_id, workout_date, workout_type, duration, intensity, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(workout.member_id)
        .bind(workout.workout_date)
        .bind(&workout.workout_type)
        .bind(workout.duration)
        .bind(&workout.intensity)
        .bind(&workout.notes)
        .execute(&mut *conn)
        .await?;

        let workout_id = result.last_insert_rowid();
        info!(
            workout_id,
            member_id = workout.member_id,
            workout_type = %workout.workout_type,
            "created workout"
        );

        Ok(workout.into_workout(workout_id))
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Workout> {
        let mut conn = acquire(&self.pool).await?;

        sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, member_id, workout_date, workout_type, duration, intensity, notes
            FROM workouts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(WORKOUT_NOT_FOUND))
    }

    /// All workouts of one member, oldest date first. An empty result is a not-found.
    pub async fn find_by_member_id(&self, member_id: i64) -> DatabaseResult<Vec<Workout>> {
        let mut conn = acquire(&self.pool).await?;

        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, member_id, workout_date, workout_type, duration, intensity, notes
            FROM workouts
            WHERE member_id = ?
            ORDER BY workout_date ASC, id ASC
            "#,
        )
        .bind(member_id)
        .fetch_all(&mut *conn)
        .await?;

        if workouts.is_empty() {
            return Err(DatabaseError::not_found(NO_WORKOUTS_FOR_MEMBER));
        }

        Ok(workouts)
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Workout>> {
        let mut conn = acquire(&self.pool).await?;

        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, member_id, workout_date, workout_type, duration, intensity, notes
            FROM workouts
            ORDER BY member_id ASC, workout_date ASC, id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(workouts)
    }

    /// Overwrite a workout in a single statement.
    ///
    /// No existence check is issued first: the statement hands back the rows it
    /// changed, and an empty result means nothing matched.
    pub async fn update(&self, id: i64, changes: WorkoutChanges) -> DatabaseResult<Workout> {
        let mut conn = acquire(&self.pool).await?;

        let updated = sqlx::query_as::<_, Workout>(
            r#"
            UPDATE workouts
            SET workout_date = ?, workout_type = ?, duration = ?, intensity = ?, notes = ?
            WHERE id = ?
            RETURNING id, member_id, workout_date, workout_type, duration, intensity, notes
            "#,
        )
        .bind(changes.workout_date)
        .bind(&changes.workout_type)
        .bind(changes.duration)
        .bind(&changes.intensity)
        .bind(&changes.notes)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(WORKOUT_NOT_FOUND))?;

        info!(workout_id = id, "updated workout");
        Ok(updated)
    }

    /// Delete a workout after confirming it exists.
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut conn = acquire(&self.pool).await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM workouts WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if existing.is_none() {
            return Err(DatabaseError::not_found(WORKOUT_NOT_FOUND));
        }

        sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        info!(workout_id = id, "deleted workout");
        Ok(())
    }
}
