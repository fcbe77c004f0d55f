//! stagemap CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::InputArgs;
use commands::resolve::Mode;
use config::StageMapConfig;

#[derive(Parser, Debug)]
#[command(name = "stagemap")]
#[command(version)]
#[command(about = "Map seeds through almanac stages and report the lowest location", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine progress (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lowest location over the listed seed values
    Points(InputArgs),

    /// Lowest location over the seeds read as (start, length) ranges
    Ranges(InputArgs),

    /// Print every intermediate range list of a range-mode run
    Trace(InputArgs),
}

impl Commands {
    fn input(&self) -> &InputArgs {
        match self {
            Commands::Points(args) | Commands::Ranges(args) | Commands::Trace(args) => args,
        }
    }
}

/// Level used when `RUST_LOG` is unset.
fn default_level(cli: &Cli, config: &StageMapConfig) -> String {
    match (cli.quiet, cli.verbose) {
        (true, _) => "warn".to_string(),
        (false, 0) => config
            .log_level
            .clone()
            .unwrap_or_else(|| "info".to_string()),
        (false, 1) => "debug".to_string(),
        (false, _) => "trace".to_string(),
    }
}

fn init_logging(level: &str) {
    let default_filter =
        format!("stagemap={level},stagemap_core={level},stagemap_almanac={level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = cli.command.input();
    let (config, config_path) = StageMapConfig::resolve(input.config.as_deref(), &input.input)?;

    init_logging(&default_level(&cli, &config));
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match &cli.command {
        Commands::Points(args) => commands::resolve::execute(Mode::Points, args, &config),
        Commands::Ranges(args) => commands::resolve::execute(Mode::Ranges, args, &config),
        Commands::Trace(args) => commands::trace::execute(args, &config),
    }
}
