//! Health check endpoint handlers.
//!
//! Liveness answers as long as the process can serve requests. Readiness
//! probes the database pool (when the postgres engine is in use) and the
//! characters API.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthStatus, LivenessResponse, ReadinessResponse};
use crate::db::AsyncDbPool;
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(liveness_check))
        .routes(routes!(readiness_check))
}

#[utoipa::path(
    get,
    path = "/liveness",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive", body = LivenessResponse)
    )
)]
async fn liveness_check() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: HealthStatus::Up,
    })
}

/// Readiness probe endpoint.
///
/// # Responses
/// - `200 OK` - every dependency answered
/// - `503 Service Unavailable` - at least one dependency is down
#[utoipa::path(
    get,
    path = "/readiness",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let mut checks = BTreeMap::new();

    if let Some(pool) = &state.db_pool {
        checks.insert("database".to_string(), check_database(pool).await);
    }
    checks.insert("characters".to_string(), check_characters(&state).await);

    let response = ReadinessResponse::new(crate::pkg_version(), checks);
    let status = match response.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}

async fn check_database(pool: &AsyncDbPool) -> ComponentHealth {
    use diesel_async::RunQueryDsl;

    let start_time = Instant::now();
    let result = match pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| format!("Query failed: {}", e)),
        Err(e) => Err(format!("Connection failed: {}", e)),
    };

    component(result, start_time)
}

async fn check_characters(state: &AppState) -> ComponentHealth {
    let start_time = Instant::now();
    let result = state
        .services
        .characters
        .ping()
        .await
        .map_err(|e| e.to_string());

    component(result, start_time)
}

fn component(result: Result<(), String>, start_time: Instant) -> ComponentHealth {
    let response_time_ms = start_time.elapsed().as_millis() as u64;
    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Up,
            message: None,
            response_time_ms,
        },
        Err(message) => {
            tracing::warn!(%message, "Readiness check failed");
            ComponentHealth {
                status: HealthStatus::Down,
                message: Some(message),
                response_time_ms,
            }
        }
    }
}
