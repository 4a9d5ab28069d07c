//! # COinS CLI (`coins`)
//!
//! Render COinS spans for a JSON array of catalog items.
//!
//! ## Usage
//!
//! ```bash
//! coins --items items.json --url https://example.org/items/browse
//! coins --items items.json --url https://example.org/items/browse --config coins.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `coins=warn`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coins::{CoinsBuilder, CoinsConfig, InMemoryProvider, Item, StaticRequest};

/// Render COinS citation spans for catalog items.
#[derive(Parser, Debug)]
#[command(name = "coins", version, about)]
struct Cli {
    /// JSON file holding an array of items
    #[arg(long, value_name = "FILE")]
    items: PathBuf,

    /// Absolute URL of the page the spans are embedded in
    #[arg(long)]
    url: String,

    /// JSON configuration file (defaults apply to missing keys)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coins=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CoinsConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CoinsConfig::default(),
    };

    let json = std::fs::read_to_string(&cli.items)
        .with_context(|| format!("reading items {}", cli.items.display()))?;
    let items: Vec<Item> = serde_json::from_str(&json)
        .with_context(|| format!("parsing items {}", cli.items.display()))?;
    info!(count = items.len(), "loaded items");

    let request = StaticRequest::parse(&cli.url)?;
    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, request).with_config(config);

    println!("{}", builder.spans(&items));
    debug!(released = ?provider.released(), "released items");

    Ok(())
}
