//! Error types for registry proxy operations.

use thiserror::Error;

use crate::auth::AuthError;
use crate::client::SkipReason;

/// Errors that can occur while talking to the backing registry.
///
/// No failure is ever retried or suppressed: every variant carries enough
/// context (status code, raw body, underlying cause) to diagnose without
/// re-querying the upstream.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The caller misused the request API, e.g. a body on GET/HEAD.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What the caller did wrong.
        reason: String,
    },

    /// The endpoint configuration did not compose into a usable URL.
    #[error("invalid registry endpoint '{url}'")]
    InvalidEndpoint {
        /// The URL that was rejected.
        url: String,
        /// Parse failure, when the URL was syntactically invalid.
        #[source]
        source: Option<url::ParseError>,
    },

    /// Authentication headers could not be prepared.
    #[error("authentication setup failed: {0}")]
    Auth(#[from] AuthError),

    /// The upstream registry could not be reached (DNS, refused, timeout).
    #[error("failed to reach registry at {url}: {source}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a status other than exactly 200.
    #[error("received {status} from registry, expected 200: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Full response body, read for diagnostics.
        body: String,
    },

    /// Decoding was requested but the response carried no `Content-Type`.
    #[error("registry response is missing a content-type header")]
    MissingContentType,

    /// A JSON body was required but the response was not decoded.
    #[error("registry response was not decoded: {reason}")]
    Undecoded {
        /// Why the body was left undecoded.
        reason: SkipReason,
    },

    /// The response claimed to be JSON but could not be decoded.
    #[error("failed to decode registry response: {source}")]
    Decode {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_display() {
        let err = RegistryError::UnexpectedStatus {
            status: 503,
            body: "registry draining".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "received 503 from registry, expected 200: registry draining"
        );
    }

    #[test]
    fn test_invalid_request_display() {
        let err = RegistryError::InvalidRequest {
            reason: "cannot send a body with GET/HEAD requests".to_string(),
        };
        assert!(err.to_string().contains("GET/HEAD"));
    }

    #[test]
    fn test_undecoded_display_names_content_type() {
        let err = RegistryError::Undecoded {
            reason: SkipReason::NotJson {
                content_type: "text/plain".to_string(),
            },
        };
        assert!(err.to_string().contains("text/plain"));
    }

    #[test]
    fn test_auth_error_converts() {
        let err: RegistryError = AuthError::InvalidCredentials { scheme: "basic" }.into();
        assert!(matches!(err, RegistryError::Auth(_)));
    }
}
