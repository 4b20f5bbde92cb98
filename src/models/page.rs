use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Metadata describing one slice of an id-ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PageMeta {
    /// Computes `totalPages = ceil(total / size)`.
    ///
    /// A page past the end of a non-empty set is an error rather than an
    /// empty slice. `size` must be non-zero; request validation enforces it.
    pub fn calculate(total: u64, page: u64, size: u64) -> AppResult<Self> {
        let total_pages = total.div_ceil(size.max(1));
        if total > 0 && page > total_pages {
            return Err(AppError::PageOutOfRange { page });
        }
        Ok(Self {
            page,
            size,
            total,
            total_pages,
        })
    }
}

/// A page of domain records plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}
