//! Scout CLI
//!
//! Command-line access to the Scout client cache: cache keys, investor
//! bookmarks, and a scripted search session with live metrics.

mod config;
mod filter;
mod fixtures;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scout_cache::{CachedSearch, KeyEncoder, MetricsPoller, ResultCache};
use scout_core::types::{FilterValue, Query, UsageMetrics};
use scout_store::{FileStorage, PersistedSetStore};

use crate::config::ScoutConfig;
use crate::filter::parse_filter;
use crate::fixtures::FixtureBackend;

/// Scout - client-side result cache for the investor-matching dashboard
#[derive(Parser)]
#[command(name = "scout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for persisted records (overrides SCOUT_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cache key of a query
    Key {
        /// Filters as name=value
        #[arg(value_parser = parse_filter)]
        filters: Vec<(String, FilterValue)>,
    },

    /// Manage bookmarked investors
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Run a scripted search session and report cache metrics
    Simulate {
        /// Number of passes over the scripted searches
        #[arg(short, long, default_value = "3")]
        rounds: u32,
        /// Simulated backend latency in milliseconds
        #[arg(long, default_value = "40")]
        latency_ms: u64,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Bookmark an investor, or remove an existing bookmark
    Toggle { id: String },
    /// Check whether an investor is bookmarked
    Check { id: String },
    /// List bookmarked investors
    List,
    /// Remove every bookmark
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "scout=debug,info"
    } else {
        "scout=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ScoutConfig::from_env().context("Invalid configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Key { filters } => cmd_key(filters),
        Commands::Bookmark { action } => cmd_bookmark(&config, action).await,
        Commands::Simulate { rounds, latency_ms } => {
            cmd_simulate(&config, rounds, Duration::from_millis(latency_ms)).await
        }
    }
}

/// Print the canonical cache key
fn cmd_key(filters: Vec<(String, FilterValue)>) -> Result<()> {
    let query: Query = filters.into_iter().collect();
    println!("{}", KeyEncoder::encode(&query));
    Ok(())
}

/// Toggle, check, list, or clear bookmarks
async fn cmd_bookmark(config: &ScoutConfig, action: BookmarkAction) -> Result<()> {
    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let bookmarks = PersistedSetStore::bookmarks(storage).await;

    match action {
        BookmarkAction::Toggle { id } => {
            let added = bookmarks
                .toggle(&id)
                .await
                .with_context(|| format!("Failed to save bookmark for '{id}'"))?;
            if added {
                println!("{} {}", "★ Bookmarked:".green().bold(), id);
            } else {
                println!("{} {}", "☆ Removed bookmark:".yellow().bold(), id);
            }
        }
        BookmarkAction::Check { id } => {
            if bookmarks.contains(&id) {
                println!("{} is {}", id, "bookmarked".green());
            } else {
                println!("{} is {}", id, "not bookmarked".dimmed());
            }
        }
        BookmarkAction::List => {
            let ids = bookmarks.ids();
            if ids.is_empty() {
                println!("{}", "No bookmarked investors.".dimmed());
            }
            for id in ids {
                println!("  ★ {}", id);
            }
        }
        BookmarkAction::Clear => {
            let count = bookmarks.len();
            bookmarks.clear().await.context("Failed to clear bookmarks")?;
            println!("{} {}", "🗑  Cleared bookmarks:".yellow().bold(), count);
        }
    }

    Ok(())
}

/// Run scripted searches through the cache
async fn cmd_simulate(config: &ScoutConfig, rounds: u32, latency: Duration) -> Result<()> {
    println!("{}", "🔎 Simulating a search session...".cyan().bold());

    let cache: Arc<ResultCache> = Arc::new(ResultCache::with_config(config.cache.clone()));
    let search = CachedSearch::new(cache.clone(), FixtureBackend::new(latency));
    let poller = MetricsPoller::start(cache.clone(), config.poller.clone());

    for round in 1..=rounds {
        println!("\n{} {}", "Round".yellow().bold(), round);
        for query in scripted_queries(round) {
            let outcome = search.search(&query).await.context("Search failed")?;
            let source = if outcome.from_cache {
                "cache  ".green()
            } else {
                "backend".blue()
            };
            let ids: Vec<&str> = outcome.records.iter().map(|r| r.id.as_str()).collect();
            println!("   {} {} → [{}]", source, KeyEncoder::encode(&query).as_str().dimmed(), ids.join(", "));
        }
    }

    // Let the poller publish at least one sample covering the whole session.
    let mut updates = poller.subscribe();
    let expected = cache.metrics();
    while *updates.borrow_and_update() != expected {
        if updates.changed().await.is_err() {
            break;
        }
    }
    print_metrics("Polled metrics", &poller.latest());

    cache.clear();
    print_metrics("After clear", &cache.metrics());

    poller.stop().await;
    Ok(())
}

/// Same searches every round; field order varies to show it does not matter.
fn scripted_queries(round: u32) -> Vec<Query> {
    let fund_managers = if round % 2 == 0 {
        Query::new().with("minSize", 1_000_000).with("role", "fund_manager")
    } else {
        Query::new().with("role", "fund_manager").with("minSize", 1_000_000)
    };
    vec![
        fund_managers,
        Query::new().with("role", "angel"),
        Query::new().with("sector", vec!["climate", "health"]),
        Query::new().with("role", "fund_manager").with("page", round),
    ]
}

fn print_metrics(title: &str, metrics: &UsageMetrics) {
    println!("\n{}", format!("📊 {title}:").cyan().bold());
    println!("   {} {}", "Hits:".dimmed(), metrics.hits);
    println!("   {} {}", "Misses:".dimmed(), metrics.misses);
    println!("   {} {}", "Size:".dimmed(), metrics.size);
    println!("   {} {:.1}%", "Hit rate:".dimmed(), metrics.hit_rate() * 100.0);
}
