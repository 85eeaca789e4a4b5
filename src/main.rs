use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedbell::app::AppContext;
use feedbell::cli::{Cli, LogFormat};
use feedbell::config::Config;
use feedbell::daemon::{Daemon, DaemonConfig};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    tracing::info!("reading config file");
    let config = Config::load(cli.config.as_deref())?;
    let ctx = Arc::new(AppContext::from_config(&config, cli.workers)?);

    // Only items published after startup are ever notified.
    let mut feeds = config.descriptors(Utc::now());

    let daemon = Daemon::new(
        ctx,
        DaemonConfig {
            interval: cli.interval,
            run_once: cli.once,
        },
    );
    daemon.run(&mut feeds).await;

    Ok(())
}
