//! Error types for the gateway layer

use std::collections::BTreeMap;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use fitness_database::DatabaseError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Validation messages keyed by the offending field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request payload")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Database(String),

    #[error("Route {method} {path} is registered more than once")]
    DuplicateRoute { method: Method, path: String },
}

impl GatewayError {
    /// A validation failure carrying a single message for a single field.
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self::Validation(errors)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Database(_) | GatewayError::DuplicateRoute { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            GatewayError::Validation(errors) => json!({ "errors": errors }),
            GatewayError::Database(message) => {
                error!(%message, "store operation failed");
                json!({ "error": message })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<DatabaseError> for GatewayError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => GatewayError::NotFound(message),
            other => GatewayError::Database(other.detail().to_string()),
        }
    }
}

/// Body of every 404 and 500 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a 400 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: BTreeMap<String, Vec<String>>,
}
