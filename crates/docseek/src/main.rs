//! # docseek CLI
//!
//! Command-line front end for docseek: search the contents of text, CSV,
//! Word, Excel and PDF files under a directory for a keyword.
//!
//! ## Commands
//!
//! - `docseek search <ROOT> <KEYWORD>` - List files whose content contains the keyword
//! - `docseek open <PATH>` - Open a file with the default application
//! - `docseek config show|init|path` - Inspect configuration
//!
//! ## Examples
//!
//! ```bash
//! # Search a folder
//! docseek search ~/Documents invoice
//!
//! # Limit parallelism and get JSON output
//! docseek search ~/Documents "quarterly report" --jobs 4 --format json
//! ```
//!
//! Matches are printed as soon as they are found. Press Ctrl+C to stop a
//! search early; files already being read are allowed to finish.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docseek_core::{FnSink, MatchResult, Opener, ResultSink, SearchRequest, SearchSummary};
use docseek_extract::ExtractorRegistry;
use docseek_search::{SearchCoordinator, SystemOpener};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "docseek")]
#[command(about = "Search file contents across documents, spreadsheets and PDFs")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/docseek/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a directory tree for files containing a keyword
    Search {
        /// Directory to search
        root: PathBuf,

        /// Keyword to look for (case-insensitive)
        keyword: String,

        /// Maximum files evaluated at once (1-32)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Open a file with the system's default application
    Open {
        /// File to open
        path: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print sample configuration file
    Init,
    /// Show config file path
    Path,
}

/// Output structure for search results.
#[derive(Serialize)]
struct SearchOutput {
    root: String,
    keyword: String,
    matches: Vec<MatchResult>,
    #[serde(flatten)]
    summary: SearchSummary,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

fn init_logging(verbose: bool, level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(level)
                .with_context(|| format!("Invalid log level: {level}"))?,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Prints each match as soon as it arrives.
fn streaming_sink() -> Arc<dyn ResultSink> {
    Arc::new(FnSink::new(
        |path: &Path| {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out, "{}", path.display());
            let _ = out.flush();
        },
        |_: &SearchSummary| {},
    ))
}

/// Collects matches for printing once the search is over.
fn collecting_sink(matches: Arc<Mutex<Vec<MatchResult>>>) -> Arc<dyn ResultSink> {
    Arc::new(FnSink::new(
        move |path: &Path| {
            matches
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(MatchResult::new(path));
        },
        |_: &SearchSummary| {},
    ))
}

async fn run_search(
    config: &Config,
    format: OutputFormat,
    root: PathBuf,
    keyword: String,
    jobs: Option<usize>,
) -> Result<()> {
    let keyword = keyword.trim().to_string();
    let request =
        SearchRequest::new(root, keyword.clone()).context("Please provide a folder and a keyword")?;

    let registry = Arc::new(ExtractorRegistry::builtin(&config.extractor_config()));
    let coordinator = SearchCoordinator::new(registry, config.search_config(jobs));

    let collected = Arc::new(Mutex::new(Vec::new()));
    let sink = match format {
        OutputFormat::Text => streaming_sink(),
        OutputFormat::Json => collecting_sink(Arc::clone(&collected)),
    };

    let root_display = request.root.display().to_string();
    let cancel = CancellationToken::new();
    let handle = coordinator
        .start_search(request, sink, cancel.clone())
        .context("Failed to start search")?;

    // Ctrl+C requests cooperative cancellation
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping search");
            cancel.cancel();
        }
    });

    let summary = handle.wait().await.context("Search failed")?;
    interrupt.abort();

    match format {
        OutputFormat::Json => {
            let matches =
                std::mem::take(&mut *collected.lock().unwrap_or_else(PoisonError::into_inner));
            let output = SearchOutput {
                root: root_display,
                keyword,
                matches,
                summary,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize results")?
            );
        }
        OutputFormat::Text => print_summary(&summary),
    }

    Ok(())
}

fn print_summary(summary: &SearchSummary) {
    if let Some(reason) = &summary.root_error {
        eprintln!("Cannot read folder: {reason}");
    }

    if summary.match_count == 0 {
        eprintln!("No files found containing the keyword.");
    }

    if summary.cancelled {
        eprintln!("Cancelled: {} results", summary.match_count);
    } else {
        eprintln!("Done: {} results", summary.match_count);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.verbose, &config.logging.level)?;

    match cli.command {
        Commands::Search {
            root,
            keyword,
            jobs,
        } => {
            run_search(&config, cli.format, root, keyword, jobs).await?;
        }

        Commands::Open { path } => {
            SystemOpener::new()
                .open(&path)
                .with_context(|| format!("Cannot open file: {}", path.display()))?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&config)
                            .context("Failed to serialize config")?
                    );
                }
                OutputFormat::Text => {
                    println!(
                        "{}",
                        toml::to_string_pretty(&config).context("Failed to serialize config")?
                    );
                }
            },
            ConfigAction::Init => {
                println!("{}", Config::sample_toml());
            }
            ConfigAction::Path => {
                if let Some(path) = Config::config_path() {
                    println!("{}", path.display());
                } else {
                    println!("Could not determine config directory");
                }
            }
        },
    }

    Ok(())
}
