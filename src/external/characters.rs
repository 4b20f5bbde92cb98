//! Client for the public Rick and Morty characters API.
//!
//! The proxy does not interpret the payload: the upstream status code and
//! JSON body are handed back unchanged.

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

const SERVICE: &str = "rick-and-morty";

/// Filters accepted by `GET /character` upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CharacterQuery {
    /// Upstream page number (20 characters per page)
    pub page: Option<u32>,
    pub name: Option<String>,
    /// alive, dead or unknown
    pub status: Option<String>,
    pub species: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// female, male, genderless or unknown
    pub gender: Option<String>,
}

impl CharacterQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        let text = [
            ("name", &self.name),
            ("status", &self.status),
            ("species", &self.species),
            ("type", &self.kind),
            ("gender", &self.gender),
        ];
        for (key, value) in text {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        pairs
    }
}

/// Raw upstream answer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

#[derive(Clone)]
pub struct CharactersClient {
    http: reqwest::Client,
    base_url: String,
    liveness_url: String,
}

impl CharactersClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        liveness_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            liveness_url: liveness_url.into(),
        }
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::ExternalApi {
            service: SERVICE.into(),
            message: message.into(),
            source,
        }
    }

    fn character_url(&self, query: &CharacterQuery) -> AppResult<Url> {
        let endpoint = format!("{}/character", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint).map_err(|e| {
            Self::make_error(format!("invalid base url {}: {}", endpoint, e), Some(e.into()))
        })?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Fetches `GET {base_url}/character` with the given filters.
    pub async fn list_characters(&self, query: &CharacterQuery) -> AppResult<UpstreamResponse> {
        let url = self.character_url(query)?;
        tracing::debug!(url = %url, "Fetching characters");

        let resp = self.http.get(url).send().await.map_err(|e: reqwest::Error| {
            Self::make_error(format!("list_characters request failed: {}", e), Some(e.into()))
        })?;

        let status = resp.status();
        let body: serde_json::Value = resp.json().await.map_err(|e: reqwest::Error| {
            Self::make_error(
                format!("list_characters invalid JSON (status {}): {}", status, e),
                Some(e.into()),
            )
        })?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Characters API returned an error status");
        }
        Ok(UpstreamResponse { status, body })
    }

    /// Checks that the upstream liveness endpoint answers with a 2xx.
    pub async fn ping(&self) -> AppResult<()> {
        self.http
            .get(&self.liveness_url)
            .send()
            .await
            .map_err(|e: reqwest::Error| {
                Self::make_error(format!("ping request failed: {}", e), Some(e.into()))
            })?
            .error_for_status()
            .map_err(|e: reqwest::Error| {
                Self::make_error(format!("ping HTTP error: {}", e), Some(e.into()))
            })?;
        Ok(())
    }
}
