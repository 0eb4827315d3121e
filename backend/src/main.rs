use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use expense_ledger_backend::config::{AppConfig, CliArgs, LoggingConfig};
use expense_ledger_backend::lifecycle::shutdown_requested;
use expense_ledger_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();
    let config = AppConfig::load(&cli)?;

    init_logging(&config.logging);

    let app_state = initialize_backend(&config).await?;
    let shutdown = app_state.shutdown.clone();
    let router = create_router(app_state);

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_requested(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
