//! Proxy facade: options, eager connection, and route registration.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use charon_client::{AuthStrategy, ClientConfig, RegistryClient};

use crate::error::ProxyError;
use crate::handlers;

/// Environment variable naming the registry host.
pub const REGISTRY_HOST_VAR: &str = "REGISTRY_HOST";

/// Environment variable naming the registry port.
pub const REGISTRY_PORT_VAR: &str = "REGISTRY_PORT";

/// Options for building a [`RegistryProxy`].
///
/// Defaults match a local registry: `0.0.0.0:5000`, plain HTTP, no
/// authentication, a fresh HTTP transport.
#[derive(Debug, Clone)]
pub struct ProxyOptions {
    /// Registry host.
    pub host: String,

    /// Registry port.
    pub port: u16,

    /// Use HTTPS when talking to the registry.
    pub secure: bool,

    /// Authentication strategy for upstream requests.
    pub auth: Option<Arc<dyn AuthStrategy>>,

    /// HTTP transport to reuse. Timeout configuration belongs here, on the
    /// embedding application's transport.
    pub http: Option<reqwest::Client>,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            secure: false,
            auth: None,
            http: None,
        }
    }
}

impl ProxyOptions {
    /// Creates options with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options from the environment.
    ///
    /// `REGISTRY_HOST` overrides the host when set and non-empty;
    /// `REGISTRY_PORT` overrides the port when set.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::InvalidPort`] if `REGISTRY_PORT` is set but
    /// does not parse as a port number.
    pub fn from_env() -> Result<Self, ProxyError> {
        let mut options = Self::default();

        if let Ok(host) = std::env::var(REGISTRY_HOST_VAR) {
            if !host.is_empty() {
                options.host = host;
            }
        }

        if let Ok(port) = std::env::var(REGISTRY_PORT_VAR) {
            options.port = port
                .parse()
                .map_err(|source| ProxyError::InvalidPort {
                    value: port,
                    source,
                })?;
        }

        Ok(options)
    }

    /// Sets the registry host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the registry port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
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

    fn into_client_config(self) -> ClientConfig {
        let mut config = ClientConfig::new(self.host, self.port).with_secure(self.secure);
        if let Some(auth) = self.auth {
            config = config.with_auth(auth);
        }
        if let Some(http) = self.http {
            config = config.with_http(http);
        }
        config
    }
}

/// A connected registry proxy: a probed client plus the routes that forward
/// to it.
#[derive(Debug, Clone)]
pub struct RegistryProxy {
    client: Arc<RegistryClient>,
}

impl RegistryProxy {
    /// Builds the underlying client and verifies connectivity eagerly.
    ///
    /// There is no "construct now, fail later" mode: if the registry does
    /// not answer the probe, no proxy value is produced, so a proxy never
    /// reports itself ready while its upstream is unreachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the connectivity
    /// probe fails.
    pub async fn connect(options: ProxyOptions) -> Result<Self, ProxyError> {
        let client = RegistryClient::connect(options.into_client_config()).await?;
        tracing::info!(endpoint = %client.endpoint().base_url(), "connected to registry");

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Returns the routes this proxy serves, for merging into a
    /// caller-supplied router:
    ///
    /// - `GET|HEAD /v2`: liveness marker, `200` with an empty body.
    /// - `GET /v2/_catalog`: forwarded catalog listing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use axum::Router;
    /// use charon_proxy::{ProxyOptions, RegistryProxy};
    ///
    /// # async fn run() -> Result<(), charon_proxy::ProxyError> {
    /// let proxy = RegistryProxy::connect(ProxyOptions::from_env()?).await?;
    /// let app: Router = Router::new().merge(proxy.routes());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn routes(&self) -> Router {
        Router::new()
            .route("/v2", get(handlers::api_version))
            .route("/v2/_catalog", get(handlers::catalog))
            .with_state(Arc::clone(&self.client))
    }

    /// Returns the underlying registry client.
    #[must_use]
    pub fn client(&self) -> Arc<RegistryClient> {
        Arc::clone(&self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ProxyOptions::default();
        assert_eq!(options.host, "0.0.0.0");
        assert_eq!(options.port, 5000);
        assert!(!options.secure);
        assert!(options.auth.is_none());
    }

    #[test]
    fn test_builders() {
        let options = ProxyOptions::new()
            .with_host("registry.internal")
            .with_port(443)
            .with_secure(true);

        assert_eq!(options.host, "registry.internal");
        assert_eq!(options.port, 443);
        assert!(options.secure);
    }

    // Environment cases run in one test; REGISTRY_* is process-global state.
    #[test]
    fn test_from_env() {
        std::env::remove_var(REGISTRY_HOST_VAR);
        std::env::remove_var(REGISTRY_PORT_VAR);
        let options = ProxyOptions::from_env().unwrap();
        assert_eq!(options.host, "0.0.0.0");
        assert_eq!(options.port, 5000);

        std::env::set_var(REGISTRY_HOST_VAR, "");
        let options = ProxyOptions::from_env().unwrap();
        assert_eq!(options.host, "0.0.0.0");

        std::env::set_var(REGISTRY_HOST_VAR, "registry.internal");
        std::env::set_var(REGISTRY_PORT_VAR, "5001");
        let options = ProxyOptions::from_env().unwrap();
        assert_eq!(options.host, "registry.internal");
        assert_eq!(options.port, 5001);

        std::env::set_var(REGISTRY_PORT_VAR, "not-a-port");
        let err = ProxyOptions::from_env().unwrap_err();
        assert!(matches!(err, crate::ProxyError::InvalidPort { .. }));

        std::env::remove_var(REGISTRY_HOST_VAR);
        std::env::remove_var(REGISTRY_PORT_VAR);
    }
}
