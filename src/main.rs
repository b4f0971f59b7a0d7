mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cronograma_core::config::CronogramaConfig;
use cronograma_core::{Category, Day};
use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "cronograma")]
#[command(about = "Browse the event schedule by day and category")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for where the schedule is read from
#[derive(Args)]
struct SourceArgs {
    /// Directory containing data/schedule.json
    #[arg(long, global = true, conflicts_with = "url")]
    site: Option<PathBuf>,

    /// Base URL serving data/schedule.json
    #[arg(long, global = true)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the schedule for the selected day
    Show {
        /// Switch to this day first
        #[arg(short, long)]
        day: Option<Day>,

        /// Print every row at once instead of revealing them one by one
        #[arg(long)]
        no_anim: bool,
    },
    /// Switch the selected day
    Day { day: Day },
    /// Turn a category filter on or off (informatica, automotores)
    Toggle { category: String },
    /// Turn every category filter on, or off if they all are
    All,
    /// Show the day selector and filter buttons
    Filters,
    /// Show configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.source)?;

    match cli.command {
        Commands::Show { day, no_anim } => commands::show::run(&config, day, !no_anim).await,
        Commands::Day { day } => commands::day::run(&config, day).await,
        Commands::Toggle { category } => {
            commands::toggle::run(&config, &Category::from(category.as_str())).await
        }
        Commands::All => commands::all::run(&config).await,
        Commands::Filters => commands::filters::run(&config).await,
        Commands::Config => commands::config::run(&config),
    }
}

fn load_config(source: &SourceArgs) -> Result<CronogramaConfig> {
    let mut config = CronogramaConfig::load()?;

    if let Some(site) = &source.site {
        config.site_dir = site.clone();
        config.base_url = None;
    }
    if let Some(url) = &source.url {
        config.base_url = Some(url.clone());
    }

    Ok(config)
}

/// `RUST_LOG` directives when they parse, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
