//! Clients for third-party HTTP APIs.

pub mod characters;
pub mod client;

pub use characters::{CharacterQuery, CharactersClient, UpstreamResponse};
pub use client::build_http_client;
