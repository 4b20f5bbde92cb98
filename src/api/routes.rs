//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_PATH: &str = "/docs";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. Request ID - generates or propagates `x-request-id`
/// 2. Logging - one span per request carrying the id
/// 3. Error normalization - non-`AppError` failures become `ErrorResponse`
/// 4. Timeout - `server.request_timeout` seconds, then 408
///
/// # Routes
/// - `/users` - User CRUD operations
/// - `/characters` - Characters API proxy
/// - `/health` - Liveness and readiness probes
/// - `/docs` - Swagger UI over `/api-docs/openapi.json`
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/users", handlers::users::user_routes())
        .nest("/characters", handlers::characters::character_routes())
        .nest("/health", handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_PATH, api))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
