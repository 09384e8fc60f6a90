use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpListener;

// Error tracing
use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::AppState;
use server::auth::{Argon2Hasher, TokenService};
use server::database::SqliteCredentialStore;
use server::handlers::route;
use shared::config::load_config_or_default;

#[derive(Parser, Debug)]
#[command(name = "town-server", version, about = "Town service auth server")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, env = "TOWN_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Override `server.bind`
    #[arg(long)]
    bind: Option<String>,

    /// Override `server.port`
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config =
        load_config_or_default(&args.config).context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Read once; the token service owns it from here on.
    let secret = config
        .auth
        .resolved_jwt_secret()
        .context("Refusing to start without a token secret")?;
    let tokens = Arc::new(TokenService::new(&secret)?);

    let store = SqliteCredentialStore::connect(&config.database.url)
        .await
        .context(format!("Failed to open database {}", config.database.url))?;

    let state = AppState::new(Arc::new(store), Arc::new(Argon2Hasher), tokens);

    let addr: SocketAddr = config
        .server
        .addr()
        .parse()
        .context(format!("Invalid bind address {}", config.server.addr()))?;
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let io = TokioIo::new(stream);
                let state = state.clone();
                tokio::task::spawn(async move {
                    let service = service_fn(move |req| route(req, state.clone()));
                    if let Err(err) = http1::Builder::new()
                        .timer(TokioTimer::new())
                        .serve_connection(io, service)
                        .await
                    {
                        warn!("Error serving connection from {}: {:?}", peer, err);
                    }
                });
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Server closed!");
    Ok(())
}
