use axum::BoxError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::collections::BTreeMap;

use crate::token::store::StoreError;

/// Per-field validation messages, keyed by field name.
pub(crate) type FieldErrors = BTreeMap<&'static str, Vec<&'static str>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Invalid token lifespan: {0} milliseconds")]
    InvalidLifespan(u64),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),
    #[error("Malformed request body")]
    MalformedBody,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Invalid token header: {0}")]
    InvalidTokenHeader(&'static str),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Expired token")]
    ExpiredToken,
    #[error("User inactive or deleted")]
    InactiveUser,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if matches!(self, Error::Store(_) | Error::Bcrypt(_)) {
            tracing::error!("{:?}", self);
        }

        let (status, body) = match self {
            Error::Validation(fields) => (StatusCode::BAD_REQUEST, json!(fields)),
            Error::MalformedBody => (
                StatusCode::BAD_REQUEST,
                json!({ "detail": "Malformed request body." }),
            ),
            Error::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "non_field_errors": ["Unable to log in with provided credentials."] }),
            ),
            Error::NoCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "Authentication credentials were not provided." }),
            ),
            Error::InvalidTokenHeader(reason) => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": format!("Invalid token header. {reason}") }),
            ),
            Error::InvalidToken => (StatusCode::UNAUTHORIZED, json!({ "detail": "Invalid token." })),
            Error::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "Token has expired." }),
            ),
            Error::InactiveUser => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "User inactive or deleted." }),
            ),
            Error::Store(_) | Error::Bcrypt(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "detail": "Internal server error." }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
