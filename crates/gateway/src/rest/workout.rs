//! Workout REST endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use fitness_database::Workout;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use super::MessageResponse;
use crate::error::GatewayResult;
use crate::state::GatewayState;
use crate::validation::{self, PathId};

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkoutResponse {
    pub id: i64,
    pub member_id: i64,
    pub workout_date: NaiveDate,
    pub workout_type: String,
    pub duration: f64,
    pub intensity: Option<String>,
    pub notes: Option<String>,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            member_id: workout.member_id,
            workout_date: workout.workout_date,
            workout_type: workout.workout_type,
            duration: workout.duration,
            intensity: workout.intensity,
            notes: workout.notes,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWorkoutRequest {
    pub member_id: i64,
    pub workout_date: NaiveDate,
    pub workout_type: String,
    pub duration: f64,
    pub intensity: Option<String>,
    pub notes: Option<String>,
}

/// The owning member cannot be changed; a `member_id` in the body is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateWorkoutRequest {
    pub workout_date: NaiveDate,
    pub workout_type: String,
    pub duration: f64,
    pub intensity: Option<String>,
    pub notes: Option<String>,
}

#[utoipa::path(
    post,
    path = "/workouts",
    tag = "Workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (
            status = 400,
            description = "Invalid payload",
            body = crate::error::ValidationErrorResponse
        ),
        (
            status = 500,
            description = "Store failure, including an unknown member",
            body = crate::error::ErrorResponse
        )
    )
)]
pub async fn create_workout(
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> GatewayResult<(StatusCode, Json<WorkoutResponse>)> {
    let new_workout = validation::new_workout(&validation::payload(body)?)?;
    let workout = state.workouts.create(new_workout).await?;

    Ok((StatusCode::CREATED, Json(workout.into())))
}

#[utoipa::path(
    get,
    path = "/workouts/{id}",
    tag = "Workouts",
    params(
        ("id" = i64, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Workout details", body = WorkoutResponse),
        (status = 404, description = "Workout not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_workout(
    PathId(id): PathId,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<WorkoutResponse>> {
    let workout = state.workouts.find_by_id(id).await?;
    Ok(Json(workout.into()))
}

#[utoipa::path(
    put,
    path = "/workouts/{id}",
    tag = "Workouts",
    params(
        ("id" = i64, Path, description = "Workout id")
    ),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated", body = WorkoutResponse),
        (
            status = 400,
            description = "Invalid payload",
            body = crate::error::ValidationErrorResponse
        ),
        (status = 404, description = "Workout not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_workout(
    PathId(id): PathId,
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> GatewayResult<Json<WorkoutResponse>> {
    let changes = validation::workout_changes(&validation::payload(body)?)?;
    let workout = state.workouts.update(id, changes).await?;

    Ok(Json(workout.into()))
}

#[utoipa::path(
    delete,
    path = "/workouts/{id}",
    tag = "Workouts",
    params(
        ("id" = i64, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Workout deleted", body = MessageResponse),
        (status = 404, description = "Workout not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_workout(
    PathId(id): PathId,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<MessageResponse>> {
    state.workouts.delete(id).await?;
    Ok(Json(MessageResponse::new("Workout deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/members/{member_id}/workouts",
    tag = "Workouts",
    params(
        ("member_id" = i64, Path, description = "Member id")
    ),
    responses(
        (
            status = 200,
            description = "Workouts of the member, oldest first",
            body = Vec<WorkoutResponse>
        ),
        (
            status = 404,
            description = "No workouts found for this member",
            body = crate::error::ErrorResponse
        ),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_member_workouts(
    PathId(member_id): PathId,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<WorkoutResponse>>> {
    let workouts = state.workouts.find_by_member_id(member_id).await?;
    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}
