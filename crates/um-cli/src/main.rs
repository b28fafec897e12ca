//! Terminal driver for the Unmasked story engine.

mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use um_engine::EngineConfig;

#[derive(Parser)]
#[command(
    name = "unmasked",
    about = "Unmasked: a narrative game about masking, stress and overwhelm",
    version,
    propagate_version = true
)]
struct Cli {
    /// Character file to load instead of the built-in characters
    #[arg(short, long, global = true)]
    content: Option<PathBuf>,

    /// Overwhelm threshold for characters that do not set their own
    #[arg(short, long, global = true)]
    threshold: Option<i32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List playable characters
    List,

    /// Show a character's profile and storyline outline
    Show {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Build and lint character content
    Check,

    /// Play a character's story interactively
    Play {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Play a story headlessly with a fixed list of choices
    Run {
        /// Character name (case-insensitive)
        name: String,

        /// One-based response numbers, in order (e.g. 2,1,4)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        choices: Vec<usize>,

        /// Print the summary and history as JSON
        #[arg(long)]
        json: bool,

        /// Print the history as markdown
        #[arg(long, conflicts_with = "json")]
        markdown: bool,
    },

    /// Autoplay many random runs and report outcome statistics
    Simulate {
        /// Character name (case-insensitive)
        name: String,

        /// Number of runs
        #[arg(short, long, default_value = "100")]
        runs: usize,

        /// RNG seed for the first run
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = EngineConfig::default();
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold);
    }
    let content = cli.content.as_deref();

    match cli.command {
        Commands::List => commands::list::run(content),
        Commands::Show { name } => commands::show::run(content, &name, &config),
        Commands::Check => commands::check::run(content),
        Commands::Play { name } => commands::play::run(content, &name, config),
        Commands::Run {
            name,
            choices,
            json,
            markdown,
        } => commands::run::run(content, &name, config, &choices, json, markdown),
        Commands::Simulate {
            name,
            runs,
            seed,
            json,
        } => commands::simulate::run(content, &name, &config, runs, seed, json),
    }
}
