//! REST API endpoints for the gateway

pub mod health;
pub mod member;
pub mod workout;

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use axum::{
    handler::Handler,
    http::Method,
    routing::{self, MethodRouter},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

pub use health::*;
pub use member::*;
pub use workout::*;

type SharedState = Arc<GatewayState>;

/// Body of a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One handler bound to one method and path.
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    handler: MethodRouter<SharedState>,
}

impl Route {
    pub fn get<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        Self {
            method: Method::GET,
            path,
            handler: routing::get(handler),
        }
    }

    pub fn post<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        Self {
            method: Method::POST,
            path,
            handler: routing::post(handler),
        }
    }

    pub fn put<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        Self {
            method: Method::PUT,
            path,
            handler: routing::put(handler),
        }
    }

    pub fn delete<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        Self {
            method: Method::DELETE,
            path,
            handler: routing::delete(handler),
        }
    }
}

/// Routes collected before they are handed to axum. Building fails when a
/// method and path pair appears twice, instead of one handler shadowing the other.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Method, &'static str)> + '_ {
        self.routes.iter().map(|route| (&route.method, route.path))
    }

    pub fn into_router(self) -> GatewayResult<Router<SharedState>> {
        let mut seen = HashSet::new();
        let mut by_path: BTreeMap<&'static str, MethodRouter<SharedState>> = BTreeMap::new();

        for route in self.routes {
            if !seen.insert((route.method.clone(), route.path)) {
                return Err(GatewayError::DuplicateRoute {
                    method: route.method,
                    path: route.path.to_string(),
                });
            }

            let merged = match by_path.remove(route.path) {
                Some(existing) => existing.merge(route.handler),
                None => route.handler,
            };
            by_path.insert(route.path, merged);
        }

        Ok(by_path
            .into_iter()
            .fold(Router::new(), |router, (path, handler)| {
                router.route(path, handler)
            }))
    }
}

/// Every endpoint the service exposes.
pub fn rest_routes() -> RouteTable {
    RouteTable::new()
        .route(Route::get("/", health::welcome))
        .route(Route::get("/health", health::health_check))
        .route(Route::post("/members", member::create_member))
        .route(Route::delete("/members/:id", member::delete_member))
        .route(Route::get(
            "/members/:member_id/workouts",
            workout::list_member_workouts,
        ))
        .route(Route::post("/workouts", workout::create_workout))
        .route(Route::get("/workouts/:id", workout::get_workout))
        .route(Route::put("/workouts/:id", workout::update_workout))
        .route(Route::delete("/workouts/:id", workout::delete_workout))
}

/// Create all REST API routes
pub fn create_rest_routes() -> GatewayResult<Router<SharedState>> {
    rest_routes().into_router()
}
