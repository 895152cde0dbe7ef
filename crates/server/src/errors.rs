use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// JSON error body: `{"kind": "...", "message": "..."}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: &'a str,
}

impl JsonApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self { status, kind, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, "validation", message) }

    pub fn not_found(message: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, "not_found", message) }

    pub fn unauthorized(message: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message) }

    fn storage(message: impl Into<String>) -> Self { Self::new(StatusCode::SERVICE_UNAVAILABLE, "storage", message) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, kind = self.kind, error = %self.message, "request failed");
        }
        let body = ErrorBody { kind: self.kind, message: &self.message };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => Self::validation(m),
            ServiceError::NotFound(m) => Self::not_found(m),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, "conflict", m),
            ServiceError::Storage(m) => Self::storage(m),
            ServiceError::Model(ModelError::Validation(m)) => Self::validation(m),
            ServiceError::Model(ModelError::Db(m)) => Self::storage(m),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let message = e.to_string();
        match e {
            AuthError::Validation(_) => Self::validation(message),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, "conflict", message),
            AuthError::NotFound => Self::not_found(message),
            AuthError::Unauthorized => Self::unauthorized(message),
            AuthError::Forbidden => Self::new(StatusCode::FORBIDDEN, "forbidden", message),
            AuthError::HashError(_) | AuthError::TokenError(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", format!("auth error {}", e.code()))
            }
            AuthError::Repository(_) => Self::storage(message),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { Self::validation(r.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { Self::validation(r.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { Self::validation(r.body_text()) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_and_kind() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST, "validation"),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND, "not_found"),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT, "conflict"),
            (ServiceError::Storage("x".into()), StatusCode::SERVICE_UNAVAILABLE, "storage"),
            (ServiceError::Model(ModelError::invalid("x")), StatusCode::BAD_REQUEST, "validation"),
        ];
        for (err, status, kind) in cases {
            let mapped = JsonApiError::from(err);
            assert_eq!((mapped.status, mapped.kind), (status, kind));
        }
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(JsonApiError::from(AuthError::Unauthorized).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::Forbidden).status, StatusCode::FORBIDDEN);
        let internal = JsonApiError::from(AuthError::HashError("bad salt".into()));
        assert!(!internal.message.contains("bad salt"));
    }
}
