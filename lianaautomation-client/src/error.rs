//! Error types for client operations
//!
//! These never cross the [`AutomationClient`](crate::AutomationClient)
//! operation boundary; `probe` and `submit_form_event` fold them into status
//! values.

use lianaautomation_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// A credential field is missing or the settings could not be read
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Connection could not be established or the body could not be read
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API answered with a non-success status
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The response lacks the expected marker
    #[error("Unexpected response: {0}")]
    Response(String),

    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
