//! Client error taxonomy.
//!
//! Every backend-call failure is converted into one of these cases at the
//! point of call; none propagate as panics. Authentication failures get
//! their own case so callers can surface them distinctly from generic
//! server errors.

use thiserror::Error;

/// Errors from the konteks API client.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend rejected the session token (HTTP 401).
    #[error("authentication failed: session token rejected by the backend")]
    Auth,

    /// The backend answered with a non-success status other than 401.
    ///
    /// Local state is unchanged; the operation is retryable.
    #[error("server error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connection, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected wire format.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session token cannot be carried in an HTTP header.
    #[error("session token contains invalid header characters")]
    InvalidToken,

    /// Bulk create requested for a risk-context that already has cells.
    ///
    /// Checked client-side before any create is issued; the backend would
    /// reject it anyway.
    #[error("risk-context {0} already has matrix cells; bulk create requires an empty matrix")]
    MatrixNotEmpty(u64),
}

impl Error {
    /// Whether this failure is an authentication failure.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth)
    }
}
