//! Philosophy Walk main entry point
//!
//! This is the command-line interface for walking Wikipedia's first links.

use anyhow::Context;
use clap::Parser;
use philosophy_walk::config::{load_config, validate, Config};
use philosophy_walk::title::PageId;
use philosophy_walk::walker::{
    HttpFetcher, JitteredDelay, Outcome, TracingReporter, WalkFailure, Walker, EXIT_CONFIG_ERROR,
    EXIT_FETCH_ERROR,
};
use philosophy_walk::LinkSelector;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Philosophy Walk: does every first link lead to Philosophy?
///
/// Follows the first link of each article that is not in italics, not in
/// parentheses and not outside article space, until it reaches the target
/// page, loops, runs out of links, or uses up its hop budget.
#[derive(Parser, Debug)]
#[command(name = "philosophy-walk")]
#[command(version)]
#[command(about = "Follow Wikipedia's first links to Philosophy", long_about = None)]
struct Cli {
    /// Start pages: titles, /wiki/ paths or article URLs [default: Sport]
    #[arg(value_name = "PAGE")]
    pages: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of hops per walk
    #[arg(long, value_name = "N")]
    max_hops: Option<u32>,

    /// Page that ends the walk
    #[arg(long, value_name = "TITLE")]
    target: Option<String>,

    /// Lower bound of the pause between hops
    #[arg(long, value_name = "MS")]
    min_delay_ms: Option<u64>,

    /// Upper bound of the pause between hops
    #[arg(long, value_name = "MS")]
    max_delay_ms: Option<u64>,

    /// Wiki to walk, e.g. https://de.wikipedia.org
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Run walks from several start pages concurrently
    #[arg(long)]
    parallel: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if !self.pages.is_empty() {
            config.walk.start = self.pages.clone();
        }
        if let Some(max_hops) = self.max_hops {
            config.walk.max_hops = max_hops;
        }
        if let Some(target) = &self.target {
            config.walk.target = target.clone();
        }
        if let Some(min) = self.min_delay_ms {
            config.walk.min_delay_ms = min;
        }
        if let Some(max) = self.max_delay_ms {
            config.walk.max_delay_ms = max;
        }
        if let Some(base_url) = &self.base_url {
            config.wiki.base_url = base_url.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    match handle_walk(config, cli.parallel).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("philosophy_walk=info,warn"),
            1 => EnvFilter::new("philosophy_walk=debug,info"),
            2 => EnvFilter::new("philosophy_walk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (if any), applies overrides and validates
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Runs every configured walk and returns the process exit status
async fn handle_walk(config: Config, parallel: bool) -> anyhow::Result<u8> {
    let starts = config.start_pages()?;
    let target = config.target_page()?;
    let selector = LinkSelector::new(config.disallowed_targets()?);
    let fetcher = HttpFetcher::from_config(&config)?;

    tracing::info!(
        "Walking {} start page(s) towards {} on {} (max {} hops)",
        starts.len(),
        target,
        fetcher.base_url(),
        config.walk.max_hops
    );

    let walker = Walker::new(fetcher, selector, target, config.walk.max_hops)
        .with_wait(JitteredDelay::from_millis(
            config.walk.min_delay_ms,
            config.walk.max_delay_ms,
        ))
        .with_reporter(TracingReporter);

    let results = Arc::new(walker).run_all(starts, parallel).await;

    print_summary(&results);

    Ok(results
        .iter()
        .map(|(_, result)| exit_code(result))
        .find(|code| *code != 0)
        .unwrap_or(0))
}

fn exit_code(result: &Result<Outcome, WalkFailure>) -> u8 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(_) => EXIT_FETCH_ERROR,
    }
}

/// Prints one block per walk: start page, result and the path taken
fn print_summary(results: &[(PageId, Result<Outcome, WalkFailure>)]) {
    println!("\n=== Philosophy Walk Summary ===");

    for (start, result) in results {
        println!();
        let path = match result {
            Ok(outcome) => {
                println!("{}: {} ({})", start, outcome, outcome.kind());
                outcome.path()
            }
            Err(failure) => {
                println!("{}: failed: {}", start, failure.source);
                failure.path.as_slice()
            }
        };

        for (step, page) in path.iter().enumerate() {
            println!("  {:>4}. {}", step, page);
        }
    }
}
