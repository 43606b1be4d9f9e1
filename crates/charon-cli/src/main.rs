//! Charon - standalone Docker/OCI Distribution registry proxy server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charon_client::{BasicAuth, BearerAuth};
use charon_proxy::{ProxyOptions, RegistryProxy};

/// Proxy a Docker/OCI Distribution registry through a local HTTP server.
#[derive(Parser, Debug)]
#[command(name = "charon")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Registry host (falls back to REGISTRY_HOST, then 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Registry port (falls back to REGISTRY_PORT, then 5000)
    #[arg(long)]
    port: Option<u16>,

    /// Reach the registry over HTTPS
    #[arg(long)]
    secure: bool,

    /// Username for basic authentication against the registry
    #[arg(long, requires = "password", conflicts_with = "bearer_token")]
    username: Option<String>,

    /// Password for basic authentication against the registry
    #[arg(long, requires = "username")]
    password: Option<String>,

    /// Bearer token for authentication against the registry
    #[arg(long)]
    bearer_token: Option<String>,

    /// Address to serve the proxy routes on
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut options = ProxyOptions::from_env()?;
    if let Some(host) = args.host {
        options = options.with_host(host);
    }
    if let Some(port) = args.port {
        options = options.with_port(port);
    }
    options = options.with_secure(args.secure);

    if let (Some(username), Some(password)) = (args.username, args.password) {
        options = options.with_auth(Arc::new(BasicAuth::new(username, password)));
    } else if let Some(token) = args.bearer_token {
        options = options.with_auth(Arc::new(BearerAuth::new(token)));
    }

    // Fail fast: refuse to serve at all if the registry is unreachable.
    let proxy = RegistryProxy::connect(options).await?;

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    tracing::info!(listen = %args.listen, "serving registry proxy");
    axum::serve(listener, proxy.routes()).await?;

    Ok(())
}
