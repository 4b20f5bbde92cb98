use std::time::Duration;

use anyhow::Context;

/// Builds the shared HTTP client used for upstream APIs.
///
/// `reqwest::Client` pools connections internally and is cheap to clone, so
/// one instance is built at startup and handed to every upstream client.
pub fn build_http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}
