//! Vesta chat API server binary.
//!
//! Serves `GET /`, `GET /chat` and `POST /chat` on a fixed local port.

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use vesta_api::config::{ApiConfig, DEFAULT_HOST, DEFAULT_PORT};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "vesta_api_server", version, about = "Vesta chat API server")]
struct Args {
    /// Host to bind.
    #[arg(long, env = "VESTA_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

impl Args {
    fn config(&self) -> ApiConfig {
        ApiConfig::new(&self.host, self.port)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| {
                    tracing_subscriber::EnvFilter::try_new(
                        "info,vesta_api=debug,vesta_core=debug,tower_http=debug",
                    )
                })?,
        )
        .init();

    let args = Args::parse();
    let config = args.config();

    info!(bind_addr = %config.bind_addr, "starting vesta_api_server");

    let listener = TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!("Server running at http://{local_addr}");
    info!("Chat API available at http://{local_addr}{}", vesta_api::CHAT_ROUTE);

    vesta_api::serve(listener, shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
