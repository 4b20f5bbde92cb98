//! Characters proxy service.

use crate::error::AppResult;
use crate::external::{CharacterQuery, CharactersClient, UpstreamResponse};

/// Pass-through to the characters API; the payload is not interpreted.
#[derive(Clone)]
pub struct CharacterService {
    client: CharactersClient,
}

impl CharacterService {
    pub fn new(client: CharactersClient) -> Self {
        Self { client }
    }

    pub async fn list_characters(&self, query: &CharacterQuery) -> AppResult<UpstreamResponse> {
        self.client.list_characters(query).await
    }

    /// Readiness probe for the upstream API.
    pub async fn ping(&self) -> AppResult<()> {
        self.client.ping().await
    }
}
