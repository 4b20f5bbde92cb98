use utoipa::OpenApi;

pub const USER_TAG: &str = "User";
pub const CHARACTER_TAG: &str = "Characters";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Staff",
        description = "Staff directory API with a Rick and Morty characters proxy",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
            crate::models::Gender,
            crate::models::Seniority,
        )
    ),
    tags(
        (name = USER_TAG, description = "User management endpoints"),
        (name = CHARACTER_TAG, description = "Rick and Morty characters proxy"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
