//! Today's news for one location, fetched from a chat-completions API and
//! filtered down to distinct topics.
//!
//! The interesting part is [`dedup`]; everything else is the I/O around it.

pub mod api;
pub mod config;
pub mod dedup;
pub mod envelope;
pub mod error;
pub mod models;
pub mod news;
pub mod prompts;
pub mod store;
pub mod utils;

pub use dedup::{dedupe, dedupe_with, DedupPolicy};
pub use error::NewsError;
pub use models::{FetchReport, NewsCandidate, StoredNewsItem};
