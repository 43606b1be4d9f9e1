//! # Charon Proxy
//!
//! Embeddable Docker/OCI Distribution proxy routes for axum servers.
//!
//! This crate is the collaborator-facing half of Charon: it wires the
//! [`charon_client`] request pipeline to two HTTP routes — a `/v2` liveness
//! marker and a `/v2/_catalog` forwarder — and hands them to any
//! caller-supplied router via [`RegistryProxy::routes`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use charon_proxy::{ProxyOptions, RegistryProxy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads REGISTRY_HOST / REGISTRY_PORT, probes the registry eagerly.
//!     let proxy = RegistryProxy::connect(ProxyOptions::from_env()?).await?;
//!
//!     let app = Router::new().merge(proxy.routes());
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod handlers;
mod proxy;

pub use error::ProxyError;
pub use handlers::ErrorBody;
pub use proxy::{ProxyOptions, RegistryProxy, REGISTRY_HOST_VAR, REGISTRY_PORT_VAR};
