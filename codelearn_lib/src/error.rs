//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding serialization and input validation failures.
#[derive(Debug)]
pub enum CodeLearnError {
    /// An error from the underlying API client.
    Api(codelearn_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl CodeLearnError {
    /// Text shown inline in a list view when a fetch fails.
    ///
    /// Application failures use the server's message when it has one;
    /// transport failures get a fixed message; everything else falls back
    /// to the list's own `fallback` text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(e) => match e {
                codelearn_api::Error::Application { .. } => e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| fallback.to_string()),
                codelearn_api::Error::Unauthorized => {
                    "Your session has expired. Please sign in again.".to_string()
                }
                codelearn_api::Error::RequestFailed | codelearn_api::Error::HttpStatus { .. } => {
                    "Could not load data.".to_string()
                }
                codelearn_api::Error::MissingData => fallback.to_string(),
            },
            Self::InvalidInput(msg) => msg.clone(),
            Self::Serialization(_) => fallback.to_string(),
        }
    }
}

impl fmt::Display for CodeLearnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CodeLearnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<codelearn_api::Error> for CodeLearnError {
    fn from(e: codelearn_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for CodeLearnError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
