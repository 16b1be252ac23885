//! Customer contacts REST API server.
//!
//! Wires configuration, the in-memory customer store, and the HTTP
//! router together, then serves until Ctrl+C.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crm_api::{router::Router, server::Server};
use crm_core::{config::CrmConfig, CustomerStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the contacts server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory served for paths outside the API
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,

    /// Request body timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Start with an empty contact list instead of the demo customers
    #[arg(long)]
    no_seed: bool,
}

impl Args {
    fn config(&self) -> CrmConfig {
        CrmConfig {
            static_dir: self.static_dir.clone(),
            request_timeout_ms: self.request_timeout_ms,
            seed_demo_data: !self.no_seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Arc::new(args.config());

    let store = if config.seed_demo_data {
        CustomerStore::seeded()
    } else {
        CustomerStore::new()
    };
    let store = Arc::new(store);

    let router = Router::new(store.clone(), config.clone()).context("Failed to build routes")?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;
    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        host = %args.host,
        port = args.port,
        static_dir = %config.static_dir.display(),
        request_timeout_ms = config.request_timeout_ms,
        customers = store.len()?,
        "Starting customer contacts server"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c")?;
    tracing::info!("Shutting down server");
    server_handle.abort();

    Ok(())
}
