//! # Today's News
//!
//! Asks a chat-completions API for a varied list of today's news from one
//! location, drops articles that repeat a topic, keeps the survivors in a
//! local store, and summarizes individual articles on request.
//!
//! ## Usage
//!
//! ```sh
//! PERPLEXITY_API_KEY=... todays_news fetch --location "NEW YORK, USA"
//! todays_news summarize https://example.com/story
//! todays_news list
//! ```
//!
//! ## Architecture
//!
//! 1. **Asking**: one completion request per operation (`api`)
//! 2. **Parsing**: the JSON array is pulled out of the free-form reply (`envelope`)
//! 3. **Filtering**: candidates repeating a category or topic are dropped (`dedup`)
//! 4. **Storing**: one row per survivor (`store`)

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::{Cli, Command};
use todays_news::api::{ChatClient, RetryAsk};
use todays_news::config::{load_config, NewsConfig};
use todays_news::news;
use todays_news::store::{JsonLinesStore, NewsStore};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.config, ?args.store_dir, ?args.command, "Parsed CLI arguments");

    let mut config = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.store_dir {
        config.store.dir = dir.clone();
    }

    match args.command {
        Command::Fetch { location, no_dedupe } => {
            let location = location.unwrap_or_else(|| config.news.location.clone());
            let dedupe = config.news.dedupe && !no_dedupe;
            fetch(&config, args.api_key.as_deref(), &location, dedupe).await?;
        }
        Command::Summarize { url } => {
            summarize(&config, args.api_key.as_deref(), &url).await?;
        }
        Command::List => {
            list(Path::new(&config.store.dir)).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

#[instrument(level = "info", skip(config, api_key))]
async fn fetch(
    config: &NewsConfig,
    api_key: Option<&str>,
    location: &str,
    dedupe: bool,
) -> Result<(), Box<dyn Error>> {
    let client = ChatClient::new(&config.api, api_key, config.api.news_max_tokens)?;
    let store = JsonLinesStore::open(&config.store.dir).await?;
    let policy = dedupe.then_some(&config.news.policy);

    let report = news::fetch_news(&RetryAsk::from_config(client, &config.api), &store, location, policy).await?;
    info!(
        parsed = report.parsed,
        saved = report.saved.len(),
        store = %store.path().display(),
        "Fetch complete"
    );
    println!("{}", report.raw);
    Ok(())
}

#[instrument(level = "info", skip(config, api_key))]
async fn summarize(config: &NewsConfig, api_key: Option<&str>, url: &str) -> Result<(), Box<dyn Error>> {
    let client = ChatClient::new(&config.api, api_key, config.api.summary_max_tokens)?;
    let summary = news::summarize_article(&RetryAsk::from_config(client, &config.api), url).await?;
    println!("{summary}");
    Ok(())
}

#[instrument(level = "info")]
async fn list(dir: &Path) -> Result<(), Box<dyn Error>> {
    let store = JsonLinesStore::open(dir).await?;
    let items = store.list().await?;
    info!(count = items.len(), "Listing stored news items");
    for item in items {
        println!("[{}] {} ({}, {})", item.category, item.title, item.source, item.date);
        if !item.url.is_empty() {
            println!("    {}", item.url);
        }
        println!("    {}", item.excerpt);
    }
    Ok(())
}
