use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::Notify;
use tracing::info;

use ingest_gateway::{DocumentFetcher, FetchConfig, IngestionGatewayBuilder};
use ingest_server::api::{self, AppState};
use ingest_server::backends::{create_object_store, create_publisher};
use ingest_server::config::IngestConfig;
use ingest_server::telemetry;

/// Document ingestion gateway HTTP server.
#[derive(Parser, Debug)]
#[command(
    name = "ingest-server",
    about = "Accepts documents, stores them by digest and publishes ingestion events"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "ingest.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The file is optional; environment variables can supply everything.
    let mut config: IngestConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };
    config.apply_process_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let telemetry_guard = telemetry::init(&config.telemetry);

    config.validate()?;
    let bucket = config
        .storage
        .bucket()
        .map(str::to_owned)
        .ok_or("storage bucket is required")?;

    info!(
        storage = %config.storage.backend,
        bucket = %bucket,
        broker = %config.broker.backend,
        "starting ingest-server"
    );

    let store = create_object_store(&config.storage).await?;
    let publisher = create_publisher(&config.broker)?;

    let gateway = IngestionGatewayBuilder::new()
        .store(store)
        .publisher(publisher)
        .bucket(bucket)
        .storage_timeout(config.limits.storage_timeout())
        .publish_timeout(config.limits.publish_timeout())
        .build()?;

    let fetcher = DocumentFetcher::new(FetchConfig {
        timeout: config.limits.fetch_timeout(),
        max_bytes: config.limits.max_upload_bytes as u64,
    })?;

    let state = AppState {
        gateway: Arc::new(gateway),
        fetcher,
        max_upload_bytes: config.limits.max_upload_bytes,
    };

    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "ingest-server listening");

    let shutdown = Arc::new(Notify::new());
    let mut server = tokio::spawn({
        let shutdown = Arc::clone(&shutdown);
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await
        }
    });

    let signalled = tokio::select! {
        result = &mut server => {
            result??;
            false
        }
        () = shutdown_signal() => true,
    };

    if signalled {
        shutdown.notify_one();
        let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
        match tokio::time::timeout(shutdown_timeout, server).await {
            Ok(result) => result??,
            Err(_) => tracing::warn!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "shutdown timeout exceeded, in-flight uploads were dropped"
            ),
        }
    }

    telemetry_guard.shutdown();

    info!("ingest-server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
