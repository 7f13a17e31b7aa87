//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every failed login, whatever the cause.
pub const LOGIN_FAILED: &str = "Cédula o contraseña incorrecta";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing column: resource '{resource}' has no column '{column}'")]
    MissingColumn { resource: String, column: String },
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("validation: {0}")]
    Validation(String),
}

/// Anything surfaced by the persistence layer. The message reaches the client verbatim.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", LOGIN_FAILED)]
    Unauthorized,
    #[error("credential: {0}")]
    Credential(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Body for client-side failures: `{ "msg": ... }`.
#[derive(Serialize)]
pub struct MessageBody {
    pub msg: String,
}

/// Body for server-side failures: `{ "error": ... }`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Config(_) | AppError::Credential(_) | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            return (status, Json(ErrorBody { error: self.to_string() })).into_response();
        }
        (status, Json(MessageBody { msg: self.to_string() })).into_response()
    }
}
