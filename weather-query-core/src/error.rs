use thiserror::Error;

/// Shown when the remote service could not be reached at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Server is unreachable. Please make sure the backend is running.";

/// Shown for every other client-side failure.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Rejections raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please enter a query")]
    Empty,
    #[error("A query is already in progress")]
    Busy,
}

/// Failures of the transport itself. Never leaves the client: each
/// variant is mapped to a displayable failure message.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no response received from {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response with status {status} is not a valid payload: {body}")]
    InvalidPayload { status: u16, body: String },
}

impl TransportError {
    pub fn user_message(&self) -> &'static str {
        match self {
            TransportError::Unreachable { .. } => UNREACHABLE_MESSAGE,
            TransportError::Request { .. } | TransportError::InvalidPayload { .. } => {
                UNEXPECTED_MESSAGE
            }
        }
    }
}
