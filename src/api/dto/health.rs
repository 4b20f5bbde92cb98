//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Liveness probe body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": "up"}))]
pub struct LivenessResponse {
    pub status: HealthStatus,
}

/// Readiness probe body with one entry per dependency.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "up",
    "version": "0.1.0",
    "checks": {
        "database": { "status": "up", "response_time_ms": 3 },
        "characters": { "status": "up", "response_time_ms": 120 }
    }
}))]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    /// Optional message with details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl ReadinessResponse {
    /// Overall status is up only when every component is.
    pub fn new(version: impl Into<String>, checks: BTreeMap<String, ComponentHealth>) -> Self {
        let status = if checks.values().all(|c| c.status == HealthStatus::Up) {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        };
        Self {
            status,
            version: version.into(),
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: HealthStatus) -> ComponentHealth {
        ComponentHealth {
            status,
            message: None,
            response_time_ms: 1,
        }
    }

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(serde_json::to_string(&HealthStatus::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&HealthStatus::Down).unwrap(),
            "\"down\""
        );
    }

    #[test]
    fn test_readiness_is_down_when_any_component_is_down() {
        let mut checks = BTreeMap::new();
        checks.insert("database".to_string(), component(HealthStatus::Up));
        assert_eq!(
            ReadinessResponse::new("0.1.0", checks).status,
            HealthStatus::Up
        );

        let mut checks = BTreeMap::new();
        checks.insert("database".to_string(), component(HealthStatus::Up));
        checks.insert("characters".to_string(), component(HealthStatus::Down));
        assert_eq!(
            ReadinessResponse::new("0.1.0", checks).status,
            HealthStatus::Down
        );
    }
}
