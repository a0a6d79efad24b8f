//! Error types for the prodi-widgets crate.
//!
//! All errors use stable string messages suitable for logging. Locally
//! rejected input (empty chat message, too-short search text) never
//! constructs an error; only transport and configuration problems do.

/// Errors that can occur while driving the page widgets.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A response body did not match the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid widget configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl WidgetError {
    /// Classify a `reqwest` failure, keeping timeouts distinct so a stuck
    /// `AwaitingReply`/`InFlight` state can never outlive the client timeout.
    pub(crate) fn transport(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else if err.is_decode() {
            Self::Parse(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Convenience type alias for prodi-widgets results.
pub type Result<T> = std::result::Result<T, WidgetError>;
