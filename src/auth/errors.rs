//! Authentication errors and their HTTP rendering

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

/// Failures of the session & authorization gate.
///
/// `TokenInvalid` and `TokenExpired` stay distinct so a client could attempt a
/// silent refresh on expiry, but both render the same "sign in again" body.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("an account with this email already exists")]
    DuplicateAccount,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("token is malformed, tampered with or revoked")]
    TokenInvalid,
    #[error("token has expired")]
    TokenExpired,
    #[error("insufficient permissions")]
    Forbidden,
    #[error("{0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::DuplicateAccount => "duplicate_account",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::TokenInvalid | AuthError::TokenExpired => "unauthenticated",
            AuthError::Forbidden => "forbidden",
            AuthError::InvalidInput(_) => "invalid_input",
            AuthError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::DuplicateAccount => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                "Please sign in again".to_string()
            }
            AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(format!("{err:#}"))
    }
}

/// Malformed or incomplete request bodies, including unknown roles.
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Internal(detail) => error!(detail = %detail, "Auth internal failure"),
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                debug!(kind = ?self, "Rejected bearer token")
            }
            _ => {}
        }

        let body = json!({
            "error": self.code(),
            "message": self.public_message(),
        });

        (self.status(), Json(body)).into_response()
    }
}
