//! Registry request client for the Docker/OCI Distribution `/v2` API.
//!
//! A [`RegistryClient`] performs exactly-once, non-retried HTTP exchanges
//! against a single registry endpoint, normalizing the Distribution API's
//! conventions: the mandatory `/v2` path prefix, a strict 200-only success
//! status, header passthrough, and conditional JSON decoding with an
//! explicit [`Decoded`] outcome.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::AuthStrategy;
use crate::config::{ClientConfig, RegistryEndpoint};
use crate::error::RegistryError;

/// The result of a single registry exchange with decoding requested.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    /// Response headers, returned regardless of the decode outcome so that
    /// callers can propagate them.
    pub headers: HeaderMap,

    /// The decode outcome for the response body.
    pub body: Decoded<T>,
}

/// Whether the response body was decoded.
///
/// Decoding is conditional on the upstream's `Content-Type`; a response
/// that was not JSON is reported explicitly rather than silently left
/// untouched, so callers cannot mistake "not decoded" for "decoded but
/// empty".
#[derive(Debug, Clone)]
pub enum Decoded<T> {
    /// The body was JSON and decoded into the requested type.
    Decoded(T),

    /// The body was left undecoded.
    Skipped(SkipReason),
}

impl<T> Decoded<T> {
    /// Returns true if the body was decoded.
    #[must_use]
    pub const fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    /// Returns the decoded value, if any.
    #[must_use]
    pub fn into_decoded(self) -> Option<T> {
        match self {
            Self::Decoded(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }
}

/// Why a response body was left undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The response carried a content type other than `application/json`.
    NotJson {
        /// The content type the registry sent.
        content_type: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotJson { content_type } => {
                write!(f, "response content type '{content_type}' is not JSON")
            }
        }
    }
}

/// Client for a single OCI Distribution registry endpoint.
///
/// Construction probes the registry eagerly: a `RegistryClient` value exists
/// only if the registry was reachable at construction time. Later
/// unavailability is not re-checked; each request surfaces its own transport
/// errors.
///
/// All configuration is read-only after construction, so one client may be
/// shared across concurrent callers. Each request allocates its own
/// request/response state. Dropping an in-flight request future cancels the
/// underlying exchange.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    endpoint: RegistryEndpoint,
    auth: Option<Arc<dyn AuthStrategy>>,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Builds a client and immediately probes `HEAD {endpoint}/v2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or if the probe does not
    /// come back with status 200; no client value is produced in that case.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use charon_client::{ClientConfig, RegistryClient};
    ///
    /// # async fn run() -> Result<(), charon_client::RegistryError> {
    /// let client = RegistryClient::connect(ClientConfig::new("localhost", 5000)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: ClientConfig) -> Result<Self, RegistryError> {
        let endpoint = RegistryEndpoint::new(config.secure, config.host, config.port)?;
        let client = Self {
            endpoint,
            auth: config.auth,
            http: config.http.unwrap_or_default(),
        };

        client.request(Method::HEAD, "", None).await?;
        tracing::debug!(endpoint = %client.endpoint.base_url(), "registry probe succeeded");

        Ok(client)
    }

    /// Returns the endpoint this client talks to.
    #[must_use]
    pub const fn endpoint(&self) -> &RegistryEndpoint {
        &self.endpoint
    }

    /// Performs a raw exchange and returns the response headers.
    ///
    /// The target URL is `{endpoint}/v2{path}`; the `/v2` prefix is owned by
    /// the client and never caller-supplied. The response body is fully
    /// drained before returning.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRequest`] for a body on GET/HEAD
    /// (before any network I/O), [`RegistryError::Auth`] if the strategy
    /// fails, [`RegistryError::Transport`] for network failures, and
    /// [`RegistryError::UnexpectedStatus`] for any status other than 200.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HeaderMap, RegistryError> {
        let url = self.url_for(path);
        let response = self.execute(method, &url, body).await?;
        let headers = response.headers().clone();

        response
            .bytes()
            .await
            .map_err(|source| RegistryError::Transport { url, source })?;

        Ok(headers)
    }

    /// Performs an exchange and conditionally decodes the body as JSON.
    ///
    /// Decoding happens only when the response's `Content-Type` begins with
    /// `application/json`; any other present content type yields
    /// [`Decoded::Skipped`] with the headers still returned. The body is
    /// fully drained either way.
    ///
    /// # Errors
    ///
    /// All errors of [`request`](Self::request), plus
    /// [`RegistryError::MissingContentType`] when the 200 response has no
    /// `Content-Type` header and [`RegistryError::Decode`] when a JSON body
    /// does not decode into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Outcome<T>, RegistryError> {
        let url = self.url_for(path);
        let response = self.execute(method, &url, body).await?;
        let headers = response.headers().clone();

        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let bytes = response
            .bytes()
            .await
            .map_err(|source| RegistryError::Transport { url, source })?;

        let Some(content_type) = content_type else {
            return Err(RegistryError::MissingContentType);
        };

        if content_type.starts_with("application/json") {
            let value =
                serde_json::from_slice(&bytes).map_err(|source| RegistryError::Decode { source })?;
            Ok(Outcome {
                headers,
                body: Decoded::Decoded(value),
            })
        } else {
            tracing::debug!(%content_type, "leaving non-JSON registry response undecoded");
            Ok(Outcome {
                headers,
                body: Decoded::Skipped(SkipReason::NotJson { content_type }),
            })
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, RegistryError> {
        if (method == Method::GET || method == Method::HEAD) && body.is_some() {
            return Err(RegistryError::InvalidRequest {
                reason: format!("cannot send a body with {method} requests"),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(auth) = &self.auth {
            tracing::trace!(strategy = auth.name(), "configuring request authentication");
            auth.configure(&mut headers)?;
        }

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| RegistryError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint.base_url())
    }
}
