use std::process::ExitCode;

use clap::Parser;
use cobuy_cli::commands::load_options;
use cobuy_cli::Cli;
use cobuy_core::config::{AppConfig, LoggingConfig};

fn init_logging(config: &LoggingConfig) {
    use cobuy_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.level.parse::<Level>().unwrap_or(Level::INFO);

    // stdout carries the JSON command payload.
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // An invalid config is reported by the command itself.
    let logging = AppConfig::load(load_options(cli.config.as_deref()))
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    init_logging(&logging);

    cobuy_cli::run_cli(cli)
}
