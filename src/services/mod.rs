//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, upstream clients and handlers.

mod character_service;
mod user_service;

pub use character_service::CharacterService;
pub use user_service::{DeleteResult, UserService};

use crate::external::CharactersClient;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since repositories and the HTTP client are shared.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub characters: CharacterService,
}

impl Services {
    pub fn new(repos: Repositories, characters: CharactersClient) -> Self {
        Self {
            users: UserService::new(repos.users),
            characters: CharacterService::new(characters),
        }
    }
}
