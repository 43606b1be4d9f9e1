//! Error types for proxy construction.

use thiserror::Error;

use charon_client::RegistryError;

/// Errors that can occur while building or connecting the proxy.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `REGISTRY_PORT` environment variable did not parse as a port.
    #[error("invalid REGISTRY_PORT value '{value}': {source}")]
    InvalidPort {
        /// The rejected value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: std::num::ParseIntError,
    },

    /// The underlying registry client could not be constructed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_port_display() {
        let source = "not-a-port".parse::<u16>().unwrap_err();
        let err = ProxyError::InvalidPort {
            value: "not-a-port".to_string(),
            source,
        };
        assert!(err.to_string().contains("not-a-port"));
    }

    #[test]
    fn test_registry_error_is_transparent() {
        let err: ProxyError = RegistryError::MissingContentType.into();
        assert_eq!(
            err.to_string(),
            RegistryError::MissingContentType.to_string()
        );
    }
}
