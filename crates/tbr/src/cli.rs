//! The `tbr` command
//!
//! `tbr fetch` runs a list of items through the cached batch fetcher against
//! the configured HTTP upstream and prints one JSON object per item.
//! `tbr config` prints the effective configuration.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::ItemFetcher;
use tbr_domain::value_objects::{BatchConfig, BatchOutcome, CacheCategory};
use tbr_infrastructure::batch::BatchFetcher;
use tbr_infrastructure::cache::{CacheAside, CacheKey};
use tbr_infrastructure::concurrency::GateRegistry;
use tbr_infrastructure::config::{AppConfig, ConfigLoader, FetchConfig, FetchSource, to_toml};
use tbr_infrastructure::constants::REDDIT_GATE_NAME;
use tbr_infrastructure::factory::{CacheProviderFactory, ItemFetcherFactory};
use tbr_infrastructure::logging::init_logging;
use tracing::info;

/// Command line interface for the TravelBlogr upstream shield
#[derive(Parser, Debug)]
#[command(name = "tbr")]
#[command(about = "TravelBlogr upstream shield - gated, cached batch fetching")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch items through the cache, the gate and paced batches
    Fetch(FetchArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Arguments of `tbr fetch`
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Cache category of the items (locations, pois, weather, ...)
    #[arg(long)]
    pub category: CacheCategory,

    /// Free-text context that distinguishes cached results
    #[arg(long)]
    pub context: Option<String>,

    /// Extra cache key parameter, repeatable
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Upstream to query: http or social (overrides configuration)
    #[arg(long)]
    pub source: Option<FetchSource>,

    /// Named gate limiting concurrent upstream calls; social lookups default
    /// to the reddit gate
    #[arg(long)]
    pub gate: Option<String>,

    /// Items per batch (overrides configuration)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause between batches in milliseconds (overrides configuration)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Items to fetch
    pub items: Vec<String>,
}

impl FetchArgs {
    /// Batch configuration after command line overrides
    pub fn batch_config(&self, base: &BatchConfig) -> BatchConfig {
        BatchConfig::new(
            self.batch_size.unwrap_or(base.batch_size),
            self.delay_ms.unwrap_or(base.delay_ms),
        )
    }

    /// Fetch configuration after command line overrides
    pub fn fetch_config(&self, base: &FetchConfig) -> FetchConfig {
        let mut config = base.clone();
        if let Some(source) = self.source {
            config.source = source;
        }
        config
    }

    /// Gate applied to each item, if any
    pub fn gate_name(&self, source: FetchSource) -> Option<&str> {
        match (&self.gate, source) {
            (Some(name), _) => Some(name),
            (None, FetchSource::Social) => Some(REDDIT_GATE_NAME),
            (None, FetchSource::Http) => None,
        }
    }

    /// Cache key of `item`
    pub fn cache_key(&self, item: &str) -> String {
        let mut key = CacheKey::new(self.category, item);
        for (name, value) in &self.params {
            key = key.with_param(name, value);
        }
        if let Some(context) = &self.context {
            key = key.with_context(context);
        }
        key.build()
    }
}

/// Per-item line of `tbr fetch` output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub item: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemReport {
    /// Pair items with their results
    pub fn from_outcome(items: &[String], outcome: BatchOutcome<Value>) -> Vec<Self> {
        items
            .iter()
            .zip(outcome.into_results())
            .map(|(item, result)| match result {
                Ok(value) => Self {
                    item: item.clone(),
                    ok: true,
                    value: Some(value),
                    error: None,
                },
                Err(e) => Self {
                    item: item.clone(),
                    ok: false,
                    value: None,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    }
}

/// Run the parsed command; `Ok(false)` means every fetched item failed
pub async fn run(cli: Cli) -> Result<bool> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;

    match cli.command {
        Command::Config => {
            print!("{}", to_toml(&config)?);
            Ok(true)
        }
        Command::Fetch(args) => {
            init_logging(&config.logging)?;
            let reports = fetch(&config, &args).await?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
            Ok(reports.is_empty() || reports.iter().any(|report| report.ok))
        }
    }
}

/// Build the pipeline from `config` and fetch `args.items`
pub async fn fetch(config: &AppConfig, args: &FetchArgs) -> Result<Vec<ItemReport>> {
    let fetch_config = args.fetch_config(&config.fetch);
    let fetcher = ItemFetcherFactory::create(&fetch_config)?;
    let cache = CacheProviderFactory::create_cache_aside(&config.cache)?;
    let gates = GateRegistry::from_capacities(&config.gates)?;

    let mut batch = BatchFetcher::new(args.batch_config(&config.batch))?;
    if let Some(name) = args.gate_name(fetch_config.source) {
        let gate = gates
            .get(name)
            .ok_or_else(|| Error::config(format!("Unknown gate '{name}'")))?;
        batch = batch.with_gate(gate);
    }

    fetch_with(&fetcher, &cache, &batch, args).await
}

/// Fetch `args.items` with an already assembled pipeline
pub async fn fetch_with(
    fetcher: &Arc<dyn ItemFetcher>,
    cache: &CacheAside,
    batch: &BatchFetcher,
    args: &FetchArgs,
) -> Result<Vec<ItemReport>> {
    let batch = batch
        .clone()
        .on_progress(|done, total| info!(done, total, "Fetch progress"));

    info!(
        items = args.items.len(),
        category = %args.category,
        fetcher = fetcher.fetcher_name(),
        "Fetching items"
    );

    let outcome = batch
        .run_cached(
            args.items.iter().cloned(),
            cache,
            args.category,
            |item: &String| args.cache_key(item),
            |item: String| async move { fetcher.fetch(&item).await },
        )
        .await?;

    Ok(ItemReport::from_outcome(&args.items, outcome))
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}
