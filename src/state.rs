//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::db::AsyncDbPool;
use crate::external::CharactersClient;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since services and the pool share their internals.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Present only with the postgres engine; used by the readiness probe.
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    pub fn new(services: Services, db_pool: Option<AsyncDbPool>) -> Self {
        Self { services, db_pool }
    }

    /// State backed by PostgreSQL through the given pool.
    pub fn postgres(pool: AsyncDbPool, characters: CharactersClient) -> Self {
        let repos = Repositories::postgres(pool.clone());
        Self::new(Services::new(repos, characters), Some(pool))
    }

    /// State backed by the process-local store.
    pub fn in_memory(characters: CharactersClient) -> Self {
        Self::new(Services::new(Repositories::in_memory(), characters), None)
    }
}
