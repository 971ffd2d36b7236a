//! Application error types: the auth gate taxonomy and the HTTP-facing `AppError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of token issuance and of the auth gate.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization` header on a protected request.
    #[error("missing credential")]
    MissingCredential,

    /// Header malformed, bad signature, malformed token or unusable payload.
    #[error("invalid credential")]
    InvalidCredential,

    /// The verifier itself failed (key or crypto fault), not the token.
    #[error("verification fault: {0}")]
    VerificationFault(String),

    /// Signing secret unusable, or signing failed.
    #[error("token configuration error: {0}")]
    Configuration(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential | AuthError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::VerificationFault(_) => StatusCode::FORBIDDEN,
            AuthError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; internal detail stays in logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential | AuthError::InvalidCredential => "unauthorized",
            AuthError::VerificationFault(_) => "You are not logged in",
            AuthError::Configuration(_) => "internal server error",
        }
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(e) => (e.status(), e.public_message().to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
