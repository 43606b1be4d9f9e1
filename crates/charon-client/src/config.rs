//! Configuration types for the registry client.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::auth::AuthStrategy;
use crate::error::RegistryError;

/// URL scheme used to reach the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTPS.
    Https,
}

impl Scheme {
    /// Derives the scheme from a secure flag.
    #[must_use]
    pub const fn from_secure(secure: bool) -> Self {
        if secure {
            Self::Https
        } else {
            Self::Http
        }
    }

    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The registry's network location. Immutable after client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoint {
    scheme: Scheme,
    host: String,
    port: u16,
}

impl RegistryEndpoint {
    /// Builds and validates an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEndpoint`] if the port is zero or the
    /// composed base URL does not parse.
    pub fn new(secure: bool, host: impl Into<String>, port: u16) -> Result<Self, RegistryError> {
        let scheme = Scheme::from_secure(secure);
        let host = host.into();

        if port == 0 {
            return Err(RegistryError::InvalidEndpoint {
                url: format!("{scheme}://{host}:0/v2"),
                source: None,
            });
        }

        let endpoint = Self { scheme, host, port };
        let base = endpoint.base_url();
        if let Err(source) = Url::parse(&base) {
            return Err(RegistryError::InvalidEndpoint {
                url: base,
                source: Some(source),
            });
        }

        Ok(endpoint)
    }

    /// Returns the scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the registry host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the registry port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the base URL of the registry's distribution API, including
    /// the mandatory `/v2` prefix.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/v2", self.scheme, self.host, self.port)
    }
}

/// Configuration for [`RegistryClient`](crate::RegistryClient) construction.
///
/// Timeouts are deliberately the transport's responsibility: pass a
/// preconfigured `reqwest::Client` via [`with_http`](Self::with_http) if the
/// embedding application needs them. The client imposes none of its own.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registry host.
    pub host: String,

    /// Registry port.
    pub port: u16,

    /// Use HTTPS instead of HTTP.
    pub secure: bool,

    /// Authentication strategy, shared with the caller.
    pub auth: Option<Arc<dyn AuthStrategy>>,

    /// HTTP transport to reuse. A default transport is built when absent.
    pub http: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Creates a configuration for the given host and port, insecure and
    /// unauthenticated by default.
    ///
    /// # Examples
    ///
    /// ```
    /// use charon_client::ClientConfig;
    ///
    /// let config = ClientConfig::new("registry.example.com", 5000).with_secure(true);
    /// assert_eq!(config.port, 5000);
    /// ```
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            secure: false,
            auth: None,
            http: None,
        }
    }

    /// Sets whether the registry is reached over HTTPS.
    #[must_use]
    pub const fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the authentication strategy.
    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AuthStrategy>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the HTTP transport to reuse.
    #[must_use]
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoAuth;

    #[test]
    fn test_scheme_from_secure() {
        assert_eq!(Scheme::from_secure(false), Scheme::Http);
        assert_eq!(Scheme::from_secure(true), Scheme::Https);
    }

    #[test]
    fn test_endpoint_base_url() {
        let endpoint = RegistryEndpoint::new(false, "0.0.0.0", 5000).unwrap();
        assert_eq!(endpoint.base_url(), "http://0.0.0.0:5000/v2");

        let secure = RegistryEndpoint::new(true, "registry.example.com", 443).unwrap();
        assert_eq!(secure.base_url(), "https://registry.example.com:443/v2");
    }

    #[test]
    fn test_endpoint_rejects_port_zero() {
        let err = RegistryEndpoint::new(false, "localhost", 0).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_endpoint_rejects_unparsable_host() {
        let err = RegistryEndpoint::new(false, "not a host", 5000).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("localhost", 5000);
        assert!(!config.secure);
        assert!(config.auth.is_none());
        assert!(config.http.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new("localhost", 5000)
            .with_secure(true)
            .with_auth(std::sync::Arc::new(NoAuth))
            .with_http(reqwest::Client::new());

        assert!(config.secure);
        assert!(config.auth.is_some());
        assert!(config.http.is_some());
    }
}
