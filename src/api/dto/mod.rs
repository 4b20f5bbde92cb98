//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request/response DTOs
//! - `error` - Common error response DTOs
//! - `pagination` - Pagination-related DTOs
//! - `health` - Liveness and readiness probe bodies

mod error;
mod health;
mod pagination;
mod user;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthStatus, LivenessResponse, ReadinessResponse};
pub use pagination::{MAX_PAGE_SIZE, PagedResponse, PaginationParams};
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
