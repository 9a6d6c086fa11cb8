use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

use crate::domain::validation::ValidationError;
use crate::domain::DomainError;
use crate::proxy::errors::ProxyError;

/// Every failure leaves the service as `500 { "error": message }`;
/// the variant only decides how it is logged.
#[derive(Debug)]
pub enum ApiError {
    Input(String),
    Configuration(String),
    Upstream(String),
    Provider(String),
    Internal(String),
}

impl ApiError {
    fn message(&self) -> &str {
        match self {
            ApiError::Input(msg)
            | ApiError::Configuration(msg)
            | ApiError::Upstream(msg)
            | ApiError::Provider(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Input(_) => "input",
            ApiError::Configuration(_) => "configuration",
            ApiError::Upstream(_) => "upstream",
            ApiError::Provider(_) => "provider",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Input(_) | ApiError::Provider(_) => {
                warn!(kind = self.kind(), error = %self, "Request failed")
            }
            _ => error!(kind = self.kind(), error = %self, "Request failed"),
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        let message = err.to_string();
        match err.kind() {
            "configuration" => ApiError::Configuration(message),
            "input" => ApiError::Input(message),
            "provider" => ApiError::Provider(message),
            _ => ApiError::Upstream(message),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Input(err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(e) => e.into(),
            DomainError::Proxy(e) => e.into(),
            DomainError::NotFound(msg) => ApiError::Upstream(msg),
            e @ DomainError::Malformed(_) => ApiError::Internal(e.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_error_is_a_500_envelope() {
        let errors = [
            ApiError::from(ProxyError::MissingAction),
            ApiError::from(ProxyError::MissingCredential),
            ApiError::from(ProxyError::Upstream { status: 503 }),
            ApiError::from(ProxyError::Provider("Invalid key".to_string())),
            ApiError::from(DomainError::Malformed("bad".to_string())),
        ];

        for err in errors {
            let expected = err.to_string();
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json, serde_json::json!({ "error": expected }));
        }
    }

    #[test]
    fn test_proxy_error_classification() {
        assert!(matches!(
            ApiError::from(ProxyError::MissingTxHash),
            ApiError::Input(_)
        ));
        assert!(matches!(
            ApiError::from(ProxyError::MissingCredential),
            ApiError::Configuration(_)
        ));
        assert!(matches!(
            ApiError::from(ProxyError::InvalidResponse),
            ApiError::Upstream(_)
        ));
    }
}
