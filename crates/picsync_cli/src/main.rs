//! picsyncd
//!
//! The picsync photo-album sync server daemon. Runs the accept loop over
//! the in-memory collaborators until Ctrl-C.

use clap::Parser;
use picsync_server::{Server, ServerConfig, ServiceContext};
use picsync_store::{HmacIdentityProvider, MemoryBlobStore, MemoryDocumentStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Photo-album sync server.
#[derive(Parser)]
#[command(name = "picsyncd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:20200")]
    bind: SocketAddr,

    /// Maximum concurrently handled connections
    #[arg(long, default_value_t = 1000)]
    max_connections: usize,

    /// Secret for verifying credential tokens
    #[arg(long)]
    auth_secret: Option<String>,

    /// Validity of signed image download URLs, in seconds
    #[arg(long, default_value_t = 3600)]
    url_ttl_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let secret = match cli.auth_secret {
        Some(secret) => secret.into_bytes(),
        None => {
            warn!("no auth secret configured; using an insecure development secret");
            b"picsync-development-secret".to_vec()
        }
    };

    let config = ServerConfig::new(cli.bind)
        .with_max_connections(cli.max_connections)
        .with_signed_url_ttl(Duration::from_secs(cli.url_ttl_secs));

    let context = Arc::new(ServiceContext::new(
        config,
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MemoryBlobStore::new()),
        Arc::new(HmacIdentityProvider::new(secret)),
    ));
    let server = Server::new(context.clone());

    let listener = TcpListener::bind(context.config.bind_addr).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    server.serve(listener, shutdown_rx).await?;
    info!("server stopped");
    Ok(())
}
