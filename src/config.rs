//! Configuration for the veterinaria API client

use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Base configuration for the client: where the API lives and how the
/// client identifies itself.
///
/// It's recommended to load these values from environment variables rather
/// than hardcoding them.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `http://localhost:5000/api`
    pub base_url: Url,

    /// Display name of the consuming application, sent in the User-Agent
    pub app_name: String,

    /// Display version of the consuming application
    pub app_version: String,
}

impl ClientConfig {
    /// Creates a new configuration, validating the base URL.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            base_url,
            app_name: "turnos-rust".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Attempts to create configuration from environment variables.
    ///
    /// `VETERINARIA_API_URL` is required. `VETERINARIA_APP_NAME` and
    /// `VETERINARIA_APP_VERSION` override the defaults when set.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("VETERINARIA_API_URL")
            .map_err(|_| Error::config("VETERINARIA_API_URL environment variable not found"))?;
        let mut config = Self::new(&base_url)?;
        if let Ok(name) = std::env::var("VETERINARIA_APP_NAME") {
            config.app_name = name;
        }
        if let Ok(version) = std::env::var("VETERINARIA_APP_VERSION") {
            config.app_version = version;
        }
        Ok(config)
    }

    /// The User-Agent value derived from the app metadata.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.app_name, self.app_version)
    }
}

/// Tunable options for the HTTP layer.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout; `None` disables the timeout
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            // Matches the backend's expected worst-case response time
            request_timeout: Some(Duration::from_secs(15)),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}
