//! # Charon Client
//!
//! Registry request client for the Docker/OCI Distribution API.
//!
//! This crate is the core of the Charon registry proxy: a client that builds
//! spec-compliant requests against a registry's `/v2` API, pluggably attaches
//! one of several authentication schemes, validates connectivity eagerly at
//! construction time, and normalizes success/error responses into a uniform
//! result shape consumable by arbitrary HTTP handlers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use charon_client::{BasicAuth, ClientConfig, RegistryClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("localhost", 5000)
//!         .with_auth(Arc::new(BasicAuth::new("user", "pass")));
//!
//!     // Fails fast: no client exists unless the registry answered the probe.
//!     let client = RegistryClient::connect(config).await?;
//!
//!     let repositories = client.repositories().await?;
//!     println!("{repositories:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Exactly-once exchanges: no retries, no caching, no suppressed errors.
//! - Only a 200 status is success; anything else is
//!   [`RegistryError::UnexpectedStatus`] with the body kept for diagnostics.
//! - "Did we decode" is an explicit [`Decoded`] outcome, never a silent no-op.
//! - A client is safe to share across concurrent callers.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod auth;
mod catalog;
mod client;
mod config;
mod error;

pub use auth::{AuthError, AuthStrategy, BasicAuth, BearerAuth, NoAuth};
pub use catalog::Catalog;
pub use client::{Decoded, Outcome, RegistryClient, SkipReason};
pub use config::{ClientConfig, RegistryEndpoint, Scheme};
pub use error::RegistryError;
