//! `routing-cache`: inspect and exercise the routing metadata cache.
//!
//! - `check` validates a configuration file.
//! - `replay` feeds a JSON-lines event stream through the sync worker and
//!   prints the resulting cache contents.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::sync::broadcast;

use routing_metadata_cache::cache::{CacheStats, RoutingMetadataCache};
use routing_metadata_cache::config::{load_config, CacheConfig};
use routing_metadata_cache::model::{PluginData, RuleData, SelectorData};
use routing_metadata_cache::observability::{logging, metrics};
use routing_metadata_cache::store::Snapshot;
use routing_metadata_cache::sync::{read_event_stream, CacheSubscriber, SyncWorker};

#[derive(Parser)]
#[command(name = "routing-cache")]
#[command(about = "Routing metadata cache tooling", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print the effective values
    Check,
    /// Apply an event stream and print the resulting cache
    Replay {
        /// JSON-lines file, one event per line
        events: PathBuf,
        /// Print this plugin with its selectors and rules instead of stats
        #[arg(short, long)]
        plugin: Option<String>,
    },
}

/// One plugin as the request path would see it.
#[derive(Serialize)]
struct PluginView {
    plugin: Option<PluginData>,
    selectors: Vec<SelectorView>,
}

#[derive(Serialize)]
struct SelectorView {
    selector: SelectorData,
    rules: Option<Snapshot<RuleData>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CacheConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    match cli.command {
        Commands::Check => {
            tracing::info!("Configuration is valid");
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Commands::Replay { events, plugin } => {
            let cache = replay(&config, &events).await?;
            let output = match plugin {
                Some(name) => serde_json::to_string_pretty(&plugin_view(&cache, &name))?,
                None => serde_json::to_string_pretty(&cache.stats())?,
            };
            println!("{output}");
        }
    }

    Ok(())
}

async fn replay(
    config: &CacheConfig,
    path: &Path,
) -> Result<Arc<RoutingMetadataCache>, Box<dyn std::error::Error>> {
    let events = read_event_stream(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), events = events.len(), "Replaying event stream");

    let cache = RoutingMetadataCache::from_config(&config.store).shared();
    let (worker, tx) = SyncWorker::new(CacheSubscriber::new(cache.clone()), &config.sync);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let handle = worker.spawn(shutdown_rx);

    for event in events {
        tx.send(event).await?;
    }
    drop(tx);

    let applied = handle.await?;
    drop(shutdown_tx);

    let stats: CacheStats = cache.stats();
    tracing::info!(
        applied,
        plugins = stats.plugins,
        selectors = stats.selectors,
        rules = stats.rules,
        "Replay complete"
    );

    Ok(cache)
}

fn plugin_view(cache: &RoutingMetadataCache, name: &str) -> PluginView {
    let selectors = cache
        .obtain_selectors(name)
        .map(|selectors| {
            selectors
                .iter()
                .map(|selector| SelectorView {
                    selector: selector.as_ref().clone(),
                    rules: cache.obtain_rules(selector.id.as_str()),
                })
                .collect()
        })
        .unwrap_or_default();

    PluginView {
        plugin: cache.obtain_plugin(name).map(|plugin| plugin.as_ref().clone()),
        selectors,
    }
}
