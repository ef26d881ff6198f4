//! Freight rate service binary.
//!
//! Loads configuration, starts the quote store and serves the REST API
//! until SIGINT or SIGTERM. Exits with status 1 on startup failure and 3
//! if connections do not drain within the shutdown grace period.

use anyhow::Context;
use clap::Parser;
use freight_rates::api::rest::{create_router, AppState};
use freight_rates::application::services::ShipmentService;
use freight_rates::infrastructure::config::{AppConfig, LogFormat};
use freight_rates::infrastructure::persistence::in_memory::InMemoryQuoteStore;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SHUTDOWN_TIMEOUT_EXIT_CODE: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "freight-rates")]
#[command(about = "Aggregates freight quotes and reports expected rates per origin")]
struct Args {
    /// Bind address, overrides HTTP_SERVER_ADDR
    #[arg(long)]
    addr: Option<String>,

    /// Submissions between snapshot refreshes, overrides UPDATE_THRESHOLD
    #[arg(long)]
    threshold: Option<i64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    match run(config).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "server failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: Args) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load()?;
    if let Some(addr) = args.addr {
        config = config.with_http_server_addr(addr);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_update_threshold(threshold);
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn run(config: AppConfig) -> anyhow::Result<ExitCode> {
    let addr = config.socket_addr()?;
    let token = CancellationToken::new();

    let store = InMemoryQuoteStore::new(token.clone(), config.update_threshold)
        .context("failed to create quote store")?;
    let service = ShipmentService::new(Arc::new(store));
    let router = create_router(Arc::new(AppState::new(service)), config.request_timeout());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, threshold = config.update_threshold, "server listening");

    tokio::spawn(shutdown_signal(token.clone()));

    let drain = token.clone();
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move { drain.cancelled().await });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(ExitCode::SUCCESS);
        }
        () = token.cancelled() => {}
    }

    info!(timeout = ?config.shutdown_timeout(), "draining connections");
    match tokio::time::timeout(config.shutdown_timeout(), server).await {
        Ok(result) => {
            result??;
            info!("server stopped");
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            error!("graceful shutdown timed out");
            Ok(ExitCode::from(SHUTDOWN_TIMEOUT_EXIT_CODE))
        }
    }
}

async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("shutdown signal received");
    token.cancel();
}
