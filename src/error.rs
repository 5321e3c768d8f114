//! Error types for Gumroad API operations.

use thiserror::Error;

/// Message carried by every [`GumroadError::Network`].
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

/// Message used when a failed envelope names no reason.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";

/// Errors that can occur during Gumroad API operations.
#[derive(Debug, Error)]
pub enum GumroadError {
    /// Connection-level failure: DNS, refused connection, TLS, timeout.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered 403/404/500, or with a body that is not a
    /// usable JSON envelope. The body itself is never surfaced.
    #[error("Network Error")]
    Network {
        /// HTTP status of the offending response.
        status: Option<u16>,
    },

    /// The envelope parsed but declared `success: false`.
    #[error("{message}")]
    Api { message: String },

    /// A payload did not match the shape of a [`Link`](crate::Link).
    #[error("Failed to decode link data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Coarse classification of a [`GumroadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Network,
    Api,
    Decode,
}

impl GumroadError {
    /// Which of the error families this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GumroadError::Transport(_) => ErrorKind::Transport,
            GumroadError::Network { .. } => ErrorKind::Network,
            GumroadError::Api { .. } => ErrorKind::Api,
            GumroadError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// True when the request itself never completed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GumroadError::Transport(e) if e.is_timeout())
    }
}

/// Result type alias for Gumroad operations.
pub type Result<T> = core::result::Result<T, GumroadError>;
