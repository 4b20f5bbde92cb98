//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError,
//! providing consistent error response formatting across the API.
//! Internal failures are logged in full and sanitized for the client.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate → 409 CONFLICT
    /// - PageOutOfRange → 400 BAD_REQUEST
    /// - Validation / ValidationErrors → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - ExternalApi → 502 BAD_GATEWAY
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Database / Configuration / Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);

        let error_response = match &self {
            AppError::NotFound { .. } | AppError::PageOutOfRange { .. } => {
                ErrorResponse::new(code, &self.to_string())
            }
            AppError::Duplicate {
                entity,
                field,
                value,
            } => ErrorResponse::duplicate_error(entity, field, value),
            AppError::Validation { field, reason } => {
                ErrorResponse::validation_error(field, reason)
            }
            AppError::ValidationErrors { errors } => ErrorResponse::validation_errors(errors),
            AppError::BadRequest { message } => ErrorResponse::new(code, message),
            AppError::ExternalApi { service, .. } => {
                tracing::warn!(error = ?self, "Upstream API call failed");
                ErrorResponse::new(code, &format!("External service '{}' is unavailable", service))
                    .with_details(json!({ "service": service }))
            }
            AppError::ConnectionPool { .. } => {
                tracing::error!(error = ?self, "Database connection unavailable");
                ErrorResponse::new(code, "Database connection unavailable")
            }
            AppError::Database { operation, .. } => {
                tracing::error!(error = ?self, "Database operation failed");
                ErrorResponse::new(code, &format!("Database operation failed: {}", operation))
            }
            AppError::Configuration { key, .. } => {
                tracing::error!(error = ?self, "Configuration error");
                ErrorResponse::new(code, &format!("Configuration error: {}", key))
            }
            AppError::Internal { .. } => {
                tracing::error!(error = ?self, "Internal error");
                ErrorResponse::new(code, "An internal error occurred")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::PageOutOfRange { .. } => StatusCode::BAD_REQUEST,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::ExternalApi { .. } => StatusCode::BAD_GATEWAY,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::PageOutOfRange { .. } => "PAGE_OUT_OF_RANGE",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::ExternalApi { .. } => "EXTERNAL_API_ERROR",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Response extension for bodies relayed from an upstream API; they leave
/// `global_error_handler` byte for byte.
#[derive(Debug, Clone, Copy)]
pub struct UpstreamBody;

/// Rewrites error responses that were not produced by `AppError`
/// (unknown routes, path rejections, timeouts) into the `ErrorResponse`
/// shape and stamps the request id on every JSON error body.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let request_id = request.extensions().get::<RequestId>().cloned();
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error())
        || response.extensions().get::<UpstreamBody>().is_some()
    {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => axum::body::Bytes::new(),
    };

    let mut error_response = if is_json {
        match serde_json::from_slice::<serde_json::Value>(&body_bytes) {
            Ok(mut value) if value.get("code").is_some() => {
                if let (Some(id), Some(obj)) = (&request_id, value.as_object_mut()) {
                    obj.insert("request_id".to_string(), json!(id.0));
                }
                return (status, Json(value)).into_response();
            }
            _ => return Response::from_parts(parts, axum::body::Body::from(body_bytes)),
        }
    } else {
        let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();
        fallback_error(status, original_message)
    };

    if let Some(id) = request_id {
        error_response = error_response.with_request_id(&id.0);
    }

    (status, Json(error_response)).into_response()
}

fn fallback_error(status: StatusCode, original_message: String) -> ErrorResponse {
    let (code, default_message) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => (
            "METHOD_NOT_ALLOWED",
            "HTTP method not allowed for this endpoint",
        ),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::SERVICE_UNAVAILABLE => ("SERVICE_UNAVAILABLE", "Service temporarily unavailable"),
        s if s.is_server_error() => ("INTERNAL_ERROR", "An internal server error occurred"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    };

    // Server-side text is never echoed back
    let message = if original_message.is_empty() || status.is_server_error() {
        default_message.to_string()
    } else {
        original_message
    };

    ErrorResponse::new(code, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            error_to_status_code(&AppError::not_found("User", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status_code(&AppError::PageOutOfRange { page: 9 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&AppError::Duplicate {
                entity: "users".into(),
                field: "email".into(),
                value: "a@b.c".into(),
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_to_status_code(&AppError::ExternalApi {
                service: "characters".into(),
                message: "timeout".into(),
                source: None,
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_to_status_code(&AppError::ConnectionPool {
                source: anyhow::anyhow!("pool timed out"),
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::not_found("User", 42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "User #42 not found");
    }

    #[tokio::test]
    async fn test_page_out_of_range_body() {
        let json = body_json(AppError::PageOutOfRange { page: 1000 }.into_response()).await;
        assert_eq!(json["code"], "PAGE_OUT_OF_RANGE");
        assert_eq!(
            json["message"],
            "The page #1000 is greater than the total pages."
        );
    }

    #[tokio::test]
    async fn test_validation_errors_body() {
        let err = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "email".into(),
                message: "Invalid email format".into(),
            }],
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["errors"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_internal_error_is_sanitized() {
        let err = AppError::Internal {
            source: anyhow::anyhow!("password=hunter2"),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "An internal error occurred");
        assert!(!json.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_upstream_body_is_left_alone() {
        use axum::{Extension, Router, middleware, routing::get};
        use tower::ServiceExt;

        let upstream = json!({"code": 42, "error": "rate limited"});
        let relayed = upstream.clone();
        let app = Router::new()
            .route(
                "/relay",
                get(move || {
                    let body = relayed.clone();
                    async move { (StatusCode::TOO_MANY_REQUESTS, Extension(UpstreamBody), Json(body)) }
                }),
            )
            .layer(middleware::from_fn(global_error_handler))
            .layer(middleware::from_fn(crate::api::middleware::request_id_middleware));

        let request = axum::http::Request::get("/relay")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body_json(response).await, upstream);
    }

    #[test]
    fn test_fallback_error_keeps_client_message() {
        let err = fallback_error(StatusCode::BAD_REQUEST, "Invalid URL".into());
        assert_eq!(err.code, "BAD_REQUEST");
        assert_eq!(err.message, "Invalid URL");

        let err = fallback_error(StatusCode::INTERNAL_SERVER_ERROR, "stack trace".into());
        assert_eq!(err.message, "An internal server error occurred");

        let err = fallback_error(StatusCode::NOT_FOUND, String::new());
        assert_eq!(err.message, "The requested resource was not found");
    }
}
