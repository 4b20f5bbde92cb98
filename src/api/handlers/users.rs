//! User CRUD request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, ErrorResponse, PagedResponse, PaginationParams, UpdateUserRequest,
    UserResponse,
};
use crate::error::AppResult;
use crate::services::DeleteResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Register user routes.
///
/// - GET /        - Paginated list
/// - POST /       - Create
/// - GET /{id}    - Fetch one
/// - PUT /{id}    - Partial update
/// - DELETE /{id} - Delete
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
}

/// GET /users - List users page by page, ascending by id.
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Requested page of users", body = PagedResponse<UserResponse>),
        (status = 400, description = "Invalid parameters or page past the end", body = ErrorResponse)
    )
)]
async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<UserResponse>>> {
    let page = state.services.users.find_all(params.page, params.size).await?;
    Ok(Json(PagedResponse::from_page(page)))
}

/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.find_one(id).await?;
    Ok(Json(user.into()))
}

/// POST /users - Returns 201 with the stored user.
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.create(payload.into_new_user()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/{id} - Only the provided fields are changed.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    request_body = UpdateUserRequest,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users
        .update(id, payload.into_update_user())
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DeleteResult),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResult>> {
    let result = state.services.users.remove(id).await?;
    Ok(Json(result))
}
