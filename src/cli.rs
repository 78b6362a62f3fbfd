//! Command-line interface definitions for Today's News.
//!
//! All global options can also come from environment variables; anything
//! given here overrides the YAML config file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the Today's News application.
///
/// # Examples
///
/// ```sh
/// # Fetch, filter and store today's news for the configured location
/// todays_news fetch
///
/// # Somewhere else, keeping every article the model returns
/// todays_news fetch --location "ROME, ITALY" --no-dedupe
///
/// # One-paragraph summary of an article
/// todays_news summarize https://example.com/story
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, env = "TODAYS_NEWS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API key for the chat-completions endpoint
    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Directory holding the news store
    #[arg(short, long, env = "TODAYS_NEWS_STORE_DIR", global = true)]
    pub store_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch today's news, drop repeated topics, and store the rest
    Fetch {
        /// Location to fetch news for
        #[arg(short, long)]
        location: Option<String>,

        /// Store every article, even when topics repeat
        #[arg(long)]
        no_dedupe: bool,
    },

    /// Summarize a single article
    #[command(visible_alias = "translate")]
    Summarize {
        /// Article URL
        url: String,
    },

    /// Print every stored news item
    List,
}
