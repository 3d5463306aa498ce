//! Member REST endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use fitness_database::Member;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use super::MessageResponse;
use crate::error::GatewayResult;
use crate::state::GatewayState;
use crate::validation::{self, PathId};

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
        }
    }
}

/// Documented shape of a member payload; requests are validated field by field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/members",
    tag = "Members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (
            status = 400,
            description = "Invalid payload",
            body = crate::error::ValidationErrorResponse
        ),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> GatewayResult<(StatusCode, Json<MemberResponse>)> {
    let new_member = validation::new_member(&validation::payload(body)?)?;
    let member = state.members.create(new_member).await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "Members",
    params(
        ("id" = i64, Path, description = "Member id")
    ),
    responses(
        (
            status = 200,
            description = "Member deleted along with its workouts",
            body = MessageResponse
        ),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_member(
    PathId(id): PathId,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<MessageResponse>> {
    state.members.delete(id).await?;
    Ok(Json(MessageResponse::new("Member deleted successfully")))
}
