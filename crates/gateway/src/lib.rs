//! # Fitness Gateway Crate
//!
//! HTTP surface of the fitness records service. Incoming payloads are checked
//! by the validator and handed to the member and workout repositories; their
//! results and failures are mapped onto status codes and JSON bodies.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fitness_database::DatabaseConfig;
//! use fitness_gateway::{create_router, GatewayState};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let state = GatewayState::from_config(&DatabaseConfig::default()).await?;
//! let app = create_router(state)?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod validation;

pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{http::Method, middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> GatewayResult<Router> {
    let arc_state = Arc::new(state);
    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(rest::create_rest_routes()?.with_state(arc_state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Add Swagger UI if in debug mode
    #[cfg(debug_assertions)]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        router = router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    Ok(router)
}

#[cfg(debug_assertions)]
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        rest::health::welcome,
        rest::health::health_check,
        rest::member::create_member,
        rest::member::delete_member,
        rest::workout::create_workout,
        rest::workout::get_workout,
        rest::workout::update_workout,
        rest::workout::delete_workout,
        rest::workout::list_member_workouts,
    ),
    components(
        schemas(
            rest::health::HealthResponse,
            rest::member::MemberResponse,
            rest::member::CreateMemberRequest,
            rest::workout::WorkoutResponse,
            rest::workout::CreateWorkoutRequest,
            rest::workout::UpdateWorkoutRequest,
            rest::MessageResponse,
            error::ErrorResponse,
            error::ValidationErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and greeting"),
        (name = "Members", description = "Member records"),
        (name = "Workouts", description = "Workout records"),
    )
)]
struct ApiDoc;
