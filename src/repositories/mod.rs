//! Repository layer for data access operations.
//!
//! `UserRepository` is the storage port the services depend on. Two adapters
//! implement it: `PgUserRepository` (diesel_async over the bb8 pool) and
//! `InMemoryUserRepository` (process-local table).

mod memory;
mod user_repo;

use std::sync::Arc;

use async_trait::async_trait;

pub use memory::InMemoryUserRepository;
pub use user_repo::PgUserRepository;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{NewUser, UpdateUser, User};

/// Storage port for user records.
///
/// Implementations must report a duplicate email as `AppError::Duplicate`
/// and return rows ordered by ascending id from `find_and_count`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns one id-ordered slice and the total number of rows.
    async fn find_and_count(&self, offset: u64, limit: u64) -> AppResult<(Vec<User>, u64)>;

    async fn find_one(&self, id: i32) -> AppResult<Option<User>>;

    /// Inserts a new row; id and timestamps are generated by the store.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Applies `changes` on top of a loaded entity without touching the store.
    fn merge(&self, user: User, changes: UpdateUser) -> User {
        user.merge(changes)
    }

    /// Writes every field of `user` back and refreshes `updated_at`.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Deletes by id and returns the number of affected rows.
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Aggregates all repositories for convenient access.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
        }
    }
}
