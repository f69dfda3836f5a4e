use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown to users for any failed catalog fetch
pub const FETCH_FAILED_MESSAGE: &str = "There was an error while fetching movies.";

/// Failures of a single catalog search request
///
/// Carries enough detail for logging. Users only ever see [`FetchError::user_message`].
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed catalog response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Generic user-facing message, independent of the failure cause
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) | AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Fetch(e) => (StatusCode::BAD_GATEWAY, e.user_message().to_string()),
            AppError::Configuration(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
