use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered 401. Never retried.
    #[error("{message}")]
    Unauthorized { message: String },

    /// Any other non-success response, decoded from the error envelope.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        fields: Vec<String>,
    },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Token store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}
