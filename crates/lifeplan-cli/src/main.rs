use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "lifeplan", version, about = "Lifeplan CLI")]
struct Cli {
    /// Path to the configuration file (default: $LIFEPLAN_CONFIG, then
    /// ~/.config/lifeplan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Weekly requirement targets per activity
    Requirements {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scheduled-vs-required coverage for a week
    Analyze {
        #[command(flatten)]
        args: commands::analyze::AnalyzeArgs,
    },
    /// Propose bookings to fill the week's gaps
    Propose {
        #[command(flatten)]
        args: commands::propose::ProposeArgs,
    },
    /// List free slots in a date range
    Slots {
        #[command(flatten)]
        args: commands::slots::SlotsArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Config { action } => commands::config::run(config, action),
        Commands::Requirements { json } => commands::requirements::run(config, json),
        Commands::Analyze { args } => commands::analyze::run(config, args),
        Commands::Propose { args } => commands::propose::run(config, args),
        Commands::Slots { args } => commands::slots::run(config, args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
