//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Page, PageMeta};

/// Maximum page length accepted from clients.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Query parameters for pagination.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: u64,

    /// Number of items per page (max 100)
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "Size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    10
}

/// Generic paged response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    /// Items of the requested page, ascending by id
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PagedResponse<T> {
    /// Converts a domain page, mapping each item into its response DTO.
    pub fn from_page<U>(page: Page<U>) -> Self
    where
        T: From<U>,
    {
        Self {
            data: page.items.into_iter().map(T::from).collect(),
            meta: page.meta,
        }
    }
}
