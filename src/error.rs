//! Error handling for the veterinaria API client

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the veterinaria API client.
///
/// Backend failures are classified by HTTP status into user-readable
/// variants; transport failures (connection refused, DNS, timeout) surface
/// as [`Error::Network`] before any status is available.
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport level errors
    #[error("Connection error with the server: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The backend rejected the request payload (HTTP 400)
    #[error("Invalid data: {0}")]
    Validation(String),

    /// HTTP 401
    #[error("Unauthorized")]
    Unauthorized,

    /// HTTP 403
    #[error("Access forbidden")]
    Forbidden,

    /// HTTP 404
    #[error("Resource not found")]
    NotFound,

    /// HTTP 500
    #[error("Internal server error: {0}")]
    Server(String),

    /// Any other non-success HTTP status
    #[error("Error {status}: {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not match the expected envelope
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side validation rejected the input before any request was made
    #[error("{0}")]
    InvalidInput(String),
}

impl Error {
    /// Classify a non-success HTTP status into a user-facing error.
    ///
    /// `message` is whatever the backend put in its error body, or the raw
    /// body text when it could not be parsed.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Error::Validation(message),
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::FORBIDDEN => Error::Forbidden,
            StatusCode::NOT_FOUND => Error::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => Error::Server(message),
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new client-side validation error
    pub fn invalid_input<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidInput(msg.to_string())
    }
}
