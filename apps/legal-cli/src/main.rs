//! Legal text CLI
//!
//! Scans, simplifies and translates legal text from a file or stdin and
//! prints JSON reports on stdout. Logs go to stderr.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shared_types::SimplificationLevel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "legal-cli")]
#[command(version, about = "Scan, simplify and translate legal text")]
struct Args {
    /// Pipeline configuration (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level. Ignored when RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find risk spans
    Scan {
        /// Input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Include the annotated markup
        #[arg(short, long)]
        annotate: bool,
    },

    /// Rewrite in plain language
    Simplify {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// simple, moderate or advanced
        #[arg(short, long, default_value = "simple")]
        level: SimplificationLevel,

        /// Skip the remote generative backend
        #[arg(long)]
        offline: bool,
    },

    /// Translate into a supported Indian language
    Translate {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Language name or code, e.g. Hindi or hi
        #[arg(short, long)]
        language: String,

        /// Skip every remote backend
        #[arg(long)]
        offline: bool,
    },

    /// List supported languages and codes
    Languages,
}

/// A valid RUST_LOG wins; otherwise `--verbose` picks debug over info
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(log_filter(rust_log.as_deref(), args.verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(args.config.as_deref())?;

    let output = match args.command {
        Command::Scan { input, annotate } => {
            let text = commands::read_input(input.as_deref())?;
            commands::scan(&config, &text, annotate)?
        }
        Command::Simplify {
            input,
            level,
            offline,
        } => {
            let text = commands::read_input(input.as_deref())?;
            commands::simplify(&config, &text, level, offline).await?
        }
        Command::Translate {
            input,
            language,
            offline,
        } => {
            let text = commands::read_input(input.as_deref())?;
            commands::translate(&config, &text, &language, offline).await?
        }
        Command::Languages => commands::languages()?,
    };

    println!("{}", output);
    Ok(())
}
