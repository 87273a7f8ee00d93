//! towadmin binary entry point

#![forbid(unsafe_code)]

use clap::Parser;
use std::path::PathBuf;
use towadmin_core::{Config, Error, Result};
use towadmin_tui::App;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "towadmin")]
#[command(about = "Admin dashboard for the towing platform")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to towadmin.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, env = "TOWADMIN_API_BASE_URL")]
    api_url: Option<String>,

    /// Override the log level
    #[arg(long, env = "TOWADMIN_LOG_LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // the terminal owns stdout, so logs go to a file
    let log_dir = config
        .logging
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let log_name = config
        .logging
        .file
        .file_name()
        .ok_or_else(|| Error::Configuration {
            message: format!("invalid log file path: {}", config.logging.file.display()),
        })?;
    let appender = tracing_appender::rolling::never(log_dir, log_name);
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.logging.level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    info!(
        base_url = %config.api.base_url,
        admin_path = %config.api.admin_path,
        "starting towadmin"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Error::Io)?;

    let mut app = App::new(config, runtime.handle().clone())?;
    app.run()
}
