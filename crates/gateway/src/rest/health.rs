use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

pub const WELCOME_MESSAGE: &str = "Welcome to the Fitness Database";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    )
)]
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
