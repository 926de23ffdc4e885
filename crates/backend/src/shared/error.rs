use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Generic body returned for failures whose detail must stay in the logs
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Errors surfaced at the HTTP boundary. Natural-key conflicts never get
/// here: get-or-create absorbs them at the storage layer.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    /// Validation failure tied to one request field, rendered as `{field: [message]}`
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Unexpected(e.into())
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for CatalogError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("Rejected query string: {}", rejection.body_text());
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for CatalogError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::field("file", rejection.body_text())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::InvalidField { field, message } => {
                let mut errors = serde_json::Map::new();
                errors.insert(field.clone(), json!([message]));
                serde_json::Value::Object(errors)
            }
            // Detail is traced and logged by the handler that reports it
            Self::Unexpected(_) => json!({ "error": GENERIC_ERROR_MESSAGE }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CatalogError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::field("file", "No file was submitted.").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::not_found("Part 5").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::from(anyhow::anyhow!("disk")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_unexpected_body_is_generic() {
        let response = CatalogError::from(anyhow::anyhow!("secret path /var/db")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": GENERIC_ERROR_MESSAGE }));
    }

    #[tokio::test]
    async fn test_field_error_shape() {
        let response = CatalogError::field("file", "No file was submitted.").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "file": ["No file was submitted."] }));
    }
}
