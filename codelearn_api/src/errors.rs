//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unparseable response).
    #[error("Request failed")]
    RequestFailed,
    /// The server answered with a non-success HTTP status and a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The server rejected the session token (HTTP 401). The session has been cleared.
    #[error("Unauthorized")]
    Unauthorized,
    /// The envelope carried an application code other than 200.
    #[error("{message}")]
    Application { code: i64, message: String },
    /// The envelope reported success but had no `data` payload.
    #[error("Response did not contain any data")]
    MissingData,
}

impl Error {
    /// The server-provided message for application failures, if it is non-empty.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Application { message, .. } if !message.trim().is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}
