use thiserror::Error;
use std::collections::HashMap;
use serde::{Serialize, Deserialize};

// Import Axum types for HTTP response conversion
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Generic message returned for every failure the caller cannot act on.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Ha ocurrido un error inesperado en el servidor";

/// Structured validation errors with field-level error mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Single { field: String, message: String },
    Multiple { fields: HashMap<String, String> },
}

impl ValidationErrors {
    /// Flattens either shape into a field -> message map.
    pub fn into_fields(self) -> HashMap<String, String> {
        match self {
            ValidationErrors::Single { field, message } => HashMap::from([(field, message)]),
            ValidationErrors::Multiple { fields } => fields,
        }
    }

    /// Message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        match self {
            ValidationErrors::Single { field: f, message } if f == field => Some(message.as_str()),
            ValidationErrors::Single { .. } => None,
            ValidationErrors::Multiple { fields } => fields.get(field).map(String::as_str),
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrors::Single { field, message } => write!(f, "{}: {}", field, message),
            ValidationErrors::Multiple { fields } => {
                let mut entries: Vec<_> = fields.iter().collect();
                entries.sort();
                let rendered: Vec<String> = entries
                    .into_iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect();
                write!(f, "{}", rendered.join("; "))
            }
        }
    }
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A schema migration failed.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A validation error with field-level details.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A conflict error (unique key already taken).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors::Single {
            field: field.to_string(),
            message: message.into(),
        })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Sqlx(_)
            | Error::Migrate(_)
            | Error::Internal(_)
            | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::validation("path", rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::validation("query", rejection.body_text())
    }
}

/// Convert custom Error to HTTP response
///
/// Not-found, conflict and validation errors carry their message to the caller.
/// Everything else is logged here and answered with a generic message.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            Error::Validation(errors) => {
                serde_json::json!({
                    "error": "Error de validación en los datos enviados",
                    "code": "VALIDATION_ERROR",
                    "fields": errors.into_fields(),
                })
            }
            Error::NotFound(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "NOT_FOUND"
                })
            }
            Error::Conflict(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "CONFLICT"
                })
            }
            other => {
                tracing::error!(error = %other, "Unexpected error while handling request");
                serde_json::json!({
                    "error": UNEXPECTED_ERROR_MESSAGE,
                    "code": "INTERNAL_ERROR"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(Error::validation("nombre", "x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Sqlx(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_fields_flatten() {
        let single = ValidationErrors::Single {
            field: "email".into(),
            message: "obligatorio".into(),
        };
        assert_eq!(single.message_for("email"), Some("obligatorio"));
        assert_eq!(single.message_for("nombre"), None);
        assert_eq!(single.into_fields().len(), 1);

        let multiple = ValidationErrors::Multiple {
            fields: HashMap::from([
                ("email".to_string(), "a".to_string()),
                ("nombre".to_string(), "b".to_string()),
            ]),
        };
        assert_eq!(multiple.to_string(), "email: a; nombre: b");
    }

    #[tokio::test]
    async fn test_internal_error_body_is_generic() {
        let response = Error::Internal("connection refused on 10.0.0.3".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], UNEXPECTED_ERROR_MESSAGE);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn test_validation_error_body_has_fields() {
        let response = Error::validation("precio", "El precio debe ser un valor positivo").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["fields"]["precio"], "El precio debe ser un valor positivo");
    }
}
