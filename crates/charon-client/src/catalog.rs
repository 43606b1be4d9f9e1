//! Catalog listing built on the registry request client.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Decoded, Outcome, RegistryClient};
use crate::error::RegistryError;

/// The registry's catalog payload, served at `GET /v2/_catalog`.
///
/// Transient: deserialized per call, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Repository names, in the order the registry reported them.
    #[serde(default)]
    pub repositories: Vec<String>,
}

impl RegistryClient {
    /// Fetches the registry catalog, headers included.
    ///
    /// # Errors
    ///
    /// Propagates any [`RegistryError`] from the underlying request.
    pub async fn catalog(&self) -> Result<Outcome<Catalog>, RegistryError> {
        self.request_json(Method::GET, "/_catalog", None).await
    }

    /// Lists the repository names known to the registry.
    ///
    /// An empty list is success, not an error. The catalog contract
    /// requires JSON, so a response the client left undecoded surfaces as
    /// [`RegistryError::Undecoded`].
    ///
    /// # Errors
    ///
    /// Propagates any [`RegistryError`] from the underlying request.
    pub async fn repositories(&self) -> Result<Vec<String>, RegistryError> {
        match self.catalog().await?.body {
            Decoded::Decoded(catalog) => Ok(catalog.repositories),
            Decoded::Skipped(reason) => Err(RegistryError::Undecoded { reason }),
        }
    }
}
