pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cobuy",
    about = "Cobuy market-basket recommender CLI",
    long_about = "Seed the recommender with synthetic baskets, inspect mined association rules, and query cross-sell recommendations.",
    after_help = "Examples:\n  cobuy stats\n  cobuy rules --top 5\n  cobuy recommend \"Toyota Camry 2023\" --record\n  cobuy services \"BMW X5\"\n  cobuy config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a cobuy.toml config file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Report transaction, itemset and rule counts for the seeded engine")]
    Stats,
    #[command(about = "List the strongest association rules by lift and confidence")]
    Rules {
        #[arg(long, help = "Number of rules to show (default 10)")]
        top: Option<usize>,
    },
    #[command(about = "Recommend products to buy alongside a product")]
    Recommend {
        #[arg(help = "Product name, e.g. \"Toyota Camry 2023\"")]
        name: String,
        #[arg(long, help = "Maximum recommendations (default from config)")]
        limit: Option<usize>,
        #[arg(long, help = "Record the view as a purchase before recommending")]
        record: bool,
    },
    #[command(about = "List add-on services associated with a product")]
    Services {
        #[arg(help = "Product name")]
        name: String,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    run_cli(Cli::parse())
}

pub fn run_cli(cli: Cli) -> ExitCode {
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Command::Stats => commands::stats::run(config_path),
        Command::Rules { top } => commands::rules::run(config_path, top),
        Command::Recommend { name, limit, record } => {
            commands::recommend::run(config_path, &name, limit, record)
        }
        Command::Services { name } => commands::services::run(config_path, &name),
        Command::Config => commands::config::run(config_path),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
