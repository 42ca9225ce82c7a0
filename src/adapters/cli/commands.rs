//! CLI Command Handlers
//!
//! `run` executes one scouting run and prints the report; `check` analyses a
//! single project by name.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use super::render;
use crate::adapters::analysis::GeminiClient;
use crate::adapters::market_data::CoinMarketCapClient;
use crate::adapters::registry::{CryptoRankClient, IcoDropsScraper};
use crate::application::{Enricher, PipelineConfig, ScoutPipeline};
use crate::config::{load_or_default, Config};

/// Presale Scout - low-cap crypto presale scouting reports
#[derive(Parser, Debug)]
#[command(
    name = "presale-scout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scouts cheap, stable, low-cap listings with a known presale or ICO",
    long_about = "Presale Scout filters the top market listings by price, volume and \
                  weekly volatility, corroborates survivors against presale registries \
                  and attaches a generated research summary to each candidate."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to configuration file (default: config/scout.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scouting pipeline once and print the report
    Run(RunCmd),

    /// Analyse a single project by name
    Check(CheckCmd),
}

/// Run one scouting pass
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the maximum number of reports
    #[arg(long, value_name = "N")]
    pub max_reports: Option<usize>,
}

/// Analyse one project
#[derive(Parser, Debug)]
pub struct CheckCmd {
    /// Project name (words are joined with spaces)
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub name: Vec<String>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCmd {
    pub fn project_name(&self) -> String {
        self.name.join(" ").trim().to_string()
    }
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<ExitCode> {
    let config = load_or_default(app.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging based on flags
    init_logging(app.verbose, app.debug, &config.logging.level);

    match app.command {
        Command::Run(cmd) => run_command(cmd, config).await,
        Command::Check(cmd) => check_command(cmd, config).await,
    }
}

/// Initialize logging system
fn init_logging(verbose: bool, debug: bool, configured_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        configured_level
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Wire adapters from configuration
pub fn build_pipeline(config: &Config) -> Result<ScoutPipeline> {
    config
        .require_market_data_key()
        .context("Cannot start a run")?;

    let listings = CoinMarketCapClient::new(config.coinmarketcap_config())
        .context("Failed to create market data client")?;
    let presale = CryptoRankClient::new(config.cryptorank_config())
        .context("Failed to create presale registry client")?;
    let analysis = GeminiClient::new(config.gemini_config())
        .context("Failed to create analysis client")?;

    if config.analysis.get_api_key().is_none() {
        tracing::warn!("No analysis API key configured, every report will use the fallback text");
    }

    let mut pipeline = ScoutPipeline::new(
        PipelineConfig::from(config),
        Arc::new(listings),
        Arc::new(analysis),
    )
    .with_registry(Arc::new(presale));

    if config.scraper.enabled {
        let scraper = IcoDropsScraper::new(config.icodrops_config())
            .context("Failed to create scraper client")?;
        pipeline = pipeline.with_registry(Arc::new(scraper));
    } else {
        tracing::info!("Upcoming-ICO scraper disabled");
    }

    Ok(pipeline)
}

/// Handle run command
async fn run_command(cmd: RunCmd, mut config: Config) -> Result<ExitCode> {
    if let Some(max_reports) = cmd.max_reports {
        config.pipeline.max_reports = max_reports;
        config.validate().context("Invalid --max-reports")?;
    }

    let pipeline = build_pipeline(&config)?;
    let outcome = pipeline.run().await;
    let generated_at = Utc::now();

    if cmd.json {
        println!("{}", render::render_outcome_json(&outcome, generated_at)?);
    } else {
        print!("{}", render::render_outcome(&outcome, generated_at));
    }

    Ok(if outcome.is_aborted() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Handle check command
async fn check_command(cmd: CheckCmd, config: Config) -> Result<ExitCode> {
    let name = cmd.project_name();
    if name.is_empty() {
        bail!("Project name must not be empty. Usage: presale-scout check <NAME>");
    }

    let analysis = GeminiClient::new(config.gemini_config())
        .context("Failed to create analysis client")?;
    let enricher = Enricher::new(Arc::new(analysis), PipelineConfig::from(&config).enrichment);

    tracing::info!("Checking {}", name);
    let report = enricher.check(&name).await;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_analysis(&report));
    }

    Ok(ExitCode::SUCCESS)
}
