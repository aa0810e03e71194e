//! CLI Command Handlers
//!
//! Argument parsing, logging setup and the batch run wiring.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::adapters::gecko_terminal::{GeckoTerminalClient, GeckoTerminalConfig};
use crate::adapters::gemini::{GeminiClient, GeminiConfig};
use crate::adapters::mysql::MySqlStore;
use crate::application::{log_details, log_summary, DecisionPipeline, ScoringEngine};
use crate::config::{load_config, Config};
use crate::domain::RunResult;
use crate::ports::TokenSource;

const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,reqwest=warn,hyper=warn,hyper_util=warn";

/// Tweet Alpha - scores whether a token's latest tweet is fresh, price-relevant news
#[derive(Parser, Debug)]
#[command(
    name = "tweet-alpha",
    version = env!("CARGO_PKG_VERSION"),
    about = "Analyze token sentiment based on tweets",
    long_about = "Selects recently mentioned tokens, gathers each token's tweets and hourly \
                  price history, and asks a language model whether the newest tweet carries \
                  new, price-relevant information."
)]
pub struct CliApp {
    /// Number of tokens to analyze
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub tokens: usize,

    /// TOML configuration file (environment variables are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    init_logging()?;

    tracing::info!("Initializing analysis service...");
    let config = resolve_config(app.config.as_ref())?;

    let timeout = config.http.timeout();
    let store = MySqlStore::connect(config.database.connect_options(), timeout)
        .await
        .context("Failed to connect to database")?;
    let store = Arc::new(store);

    let prices = GeckoTerminalClient::with_config(GeckoTerminalConfig {
        api_base_url: config.gecko_terminal.api_url.clone(),
        timeout,
    })
    .context("Failed to create GeckoTerminal client")?;

    let gemini = GeminiClient::with_config(GeminiConfig {
        api_base_url: config.gemini.api_url.clone(),
        api_key: config.gemini.api_key.clone(),
        timeout,
    })
    .context("Failed to create Gemini client")?;

    let pipeline = DecisionPipeline::new(
        store.clone(),
        Arc::new(prices),
        ScoringEngine::new(Arc::new(gemini), config.gemini.model.clone()),
    );

    run_analysis(store.as_ref(), &pipeline, app.tokens).await;
    Ok(())
}

/// Initialize logging system; `RUST_LOG` overrides the default filter
fn init_logging() -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn resolve_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&expanded).with_context(|| format!("Failed to load configuration from {}", expanded))
        }
        None => Config::from_env().context("Failed to load configuration from environment"),
    }
}

/// Select candidate tokens, analyze them in order and log the results
///
/// Returns `None` when token selection fails or yields nothing.
pub async fn run_analysis(
    tokens: &dyn TokenSource,
    pipeline: &DecisionPipeline,
    limit: usize,
) -> Option<RunResult> {
    tracing::info!("Fetching {} tokens from database...", limit);
    let candidates = match tokens.select_candidate_tokens(limit).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Error fetching tokens from database: {}", e);
            return None;
        }
    };

    if candidates.is_empty() {
        tracing::error!("No tokens found in the database");
        return None;
    }
    tracing::info!("Database query completed. Found {} token(s)", candidates.len());

    tracing::info!("Starting token analysis...");
    let results = pipeline.analyze_all(&candidates).await;

    log_summary(&results);
    log_details(&results);
    Some(results)
}
