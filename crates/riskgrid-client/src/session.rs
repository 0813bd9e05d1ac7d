//! Session context.
//!
//! The bearer token travels in an explicit [`Session`] object with an
//! explicit lifecycle — created at login, dropped (or revoked) at logout —
//! and is injected into the HTTP client rather than read from ambient
//! storage.

use crate::error::Error;
use reqwest::header::HeaderValue;

/// An authenticated session against the konteks backend.
///
/// Holds the bearer token for one login. The token is not readable back
/// out as a string; the only export is the `Authorization` header value.
#[derive(Clone)]
pub struct Session {
    token: String,
}

impl Session {
    /// Start a session from a freshly issued token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The `Authorization: Bearer <token>` header value.
    pub fn authorization(&self) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| Error::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// End the session.
    ///
    /// Consumes the session so no client can be built from it afterwards.
    pub fn revoke(self) {
        drop(self);
    }
}

impl std::fmt::Debug for Session {
    // Token never appears in logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_header_is_bearer_and_sensitive() {
        let session = Session::new("abc123");
        let value = session.authorization().expect("valid token");
        assert!(value.is_sensitive());
    }

    #[test]
    fn control_characters_in_token_are_rejected() {
        let session = Session::new("bad\ntoken");
        assert!(matches!(session.authorization(), Err(Error::InvalidToken)));
    }

    #[test]
    fn debug_does_not_leak_the_token() {
        let session = Session::new("super-secret");
        assert!(!format!("{session:?}").contains("super-secret"));
    }
}
