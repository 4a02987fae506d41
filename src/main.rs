//! MarketSentry - a terminal dashboard for stock health scores.
//!
//! Usage: `marketsentry [CONFIG_PATH]`. Without a path the config is read
//! from the platform config directory, if present.

use marketsentry::{App, Config, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal is taken over by the UI, so logs go to a file
    let _guard = init_logging()?;

    // Load configuration
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_path)?;

    // Run the application
    let mut app = App::new(config).await?;
    app.run().await?;

    Ok(())
}

fn init_logging() -> Result<WorkerGuard> {
    let log_dir = marketsentry::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "marketsentry.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketsentry=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(guard)
}
