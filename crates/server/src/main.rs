//! Web front end for the Câmara bill lookup service.
//!
//! Serves the search page, a `/consulta/{referencia}` JSON endpoint and a
//! `/api/chat` conversational endpoint over the shared query service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;

use camara_client::{ClientConfig, DadosAbertosClient, PortalClient};
use camara_consulta::ConsultaService;
use camara_server::{router, AppState};

#[derive(Parser)]
#[command(name = "camara-server")]
#[command(about = "Servidor web de consulta de proposições da Câmara", long_about = None)]
#[command(version)]
struct Cli {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Timeout per remote call, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ClientConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..ClientConfig::default()
    };
    let api = DadosAbertosClient::new(config.clone()).context("failed to build API client")?;
    let portal = PortalClient::new(config.clone()).context("failed to build portal client")?;
    let service = ConsultaService::new(Arc::new(api), Arc::new(portal), config);

    let app = router(AppState {
        service: Arc::new(service),
    });

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("camara-server listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
