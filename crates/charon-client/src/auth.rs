//! Pluggable authentication strategies for registry requests.
//!
//! A strategy is a capability, not a data record: it is handed the outgoing
//! header map and may add or overwrite headers, nothing else. Strategies are
//! shared across clients via `Arc`, so every implementation must be safe for
//! concurrent `configure` calls.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use thiserror::Error;

/// Errors that can occur while preparing authentication headers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential material could not be encoded as a header value.
    ///
    /// The credential itself is never included in the error.
    #[error("{scheme} credentials cannot be encoded as a header value")]
    InvalidCredentials {
        /// Name of the authentication scheme that rejected the credentials.
        scheme: &'static str,
    },
}

/// A pluggable mechanism for attaching credentials to outgoing requests.
///
/// `configure` may only insert or overwrite headers on the given map; it
/// must not read request state, and configuring the same map twice must
/// produce the same result. No component outside this module branches on
/// the concrete strategy type.
pub trait AuthStrategy: Send + Sync + fmt::Debug {
    /// Returns a diagnostic label for this strategy. No side effects.
    fn name(&self) -> &str;

    /// Attaches this strategy's credentials to the outgoing headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be represented as a
    /// header value.
    fn configure(&self, headers: &mut HeaderMap) -> Result<(), AuthError>;
}

/// No authentication: `configure` leaves the headers untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthStrategy for NoAuth {
    fn name(&self) -> &str {
        "no authentication"
    }

    fn configure(&self, _headers: &mut HeaderMap) -> Result<(), AuthError> {
        Ok(())
    }
}

/// HTTP Basic authentication with a username and password.
///
/// Sets `Authorization: Basic <base64(username:password)>` per RFC 7617.
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Creates a basic authentication strategy.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Credentials stay out of logs and error chains.
impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AuthStrategy for BasicAuth {
    fn name(&self) -> &str {
        "basic authentication with username + password"
    }

    fn configure(&self, headers: &mut HeaderMap) -> Result<(), AuthError> {
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let value = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|_| AuthError::InvalidCredentials { scheme: "basic" })?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Bearer token authentication.
///
/// Sets `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    /// Creates a bearer token strategy.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl AuthStrategy for BearerAuth {
    fn name(&self) -> &str {
        "bearer token authentication"
    }

    fn configure(&self, headers: &mut HeaderMap) -> Result<(), AuthError> {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| AuthError::InvalidCredentials { scheme: "bearer" })?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
