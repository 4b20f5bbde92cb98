//! Characters proxy handler.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CHARACTER_TAG;
use crate::api::dto::ErrorResponse;
use crate::api::middleware::UpstreamBody;
use crate::error::AppResult;
use crate::external::CharacterQuery;
use crate::state::AppState;

pub fn character_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_characters))
}

/// GET /characters - Relays the upstream answer, status code included.
#[utoipa::path(
    get,
    path = "/",
    tag = CHARACTER_TAG,
    params(CharacterQuery),
    responses(
        (status = 200, description = "Upstream character page", body = Object),
        (status = 404, description = "Upstream found nothing", body = Object),
        (status = 502, description = "Upstream unreachable or not JSON", body = ErrorResponse)
    )
)]
async fn list_characters(
    State(state): State<AppState>,
    Query(query): Query<CharacterQuery>,
) -> AppResult<(StatusCode, Extension<UpstreamBody>, Json<serde_json::Value>)> {
    let upstream = state.services.characters.list_characters(&query).await?;
    Ok((upstream.status, Extension(UpstreamBody), Json(upstream.body)))
}
