use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use yts_cli::app::AppContext;
use yts_cli::cli;
use yts_cli::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The terminal belongs to the picker, so logs go to a file.
    let log_path = AppContext::log_path()?;
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yts_cli=info")))
        .init();

    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    cli::run(&ctx).await?;
    Ok(())
}
