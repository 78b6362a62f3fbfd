//! The two user-facing operations: fetching today's news and summarizing a
//! single article.
//!
//! # Fetch pipeline
//!
//! 1. Ask the completion API for a varied list of recent articles
//! 2. Pull the JSON array out of the reply
//! 3. Drop repeated topics (see [`crate::dedup`])
//! 4. Write each survivor to the store
//! 5. Hand the raw reply back for display
//!
//! A reply that does not parse is not an error: it is returned as-is and
//! nothing is stored.

use crate::api::AskAsync;
use crate::dedup::{dedupe_with, DedupPolicy};
use crate::envelope::{parse_candidates, strip_code_fence};
use crate::error::NewsError;
use crate::models::{FetchReport, StoredNewsItem};
use crate::prompts::{news_prompt, summary_prompt};
use crate::store::NewsStore;
use crate::utils::{looks_truncated, truncate_for_log};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{info, instrument, warn};
use url::Url;

/// Fetch, filter, and store today's news for `location`.
///
/// # Arguments
///
/// * `asker` - Completion client, usually wrapped in [`crate::api::RetryAsk`]
/// * `store` - Where accepted items are written, in order
/// * `location` - Free-form place name put into the prompt
/// * `policy` - Topic filter thresholds; `None` stores every parsed candidate
///
/// # Returns
///
/// A [`FetchReport`] with the raw reply, the number of parsed candidates, and
/// the rows written.
///
/// # Errors
///
/// Failures of the completion request, and the first failed store write.
#[instrument(level = "info", skip(asker, store, policy))]
pub async fn fetch_news<A, S>(
    asker: &A,
    store: &S,
    location: &str,
    policy: Option<&DedupPolicy>,
) -> Result<FetchReport, NewsError>
where
    A: AskAsync<Response = String>,
    S: NewsStore,
{
    let raw = asker.ask(&news_prompt(location)).await?;

    let candidates = match parse_candidates(&raw) {
        Ok(Some(candidates)) => candidates,
        Ok(None) => {
            warn!("Completion JSON is not an array; nothing to store");
            Vec::new()
        }
        Err(e) => {
            if looks_truncated(&e) {
                warn!(error = %e, "Completion looks truncated; returning raw text");
            } else {
                warn!(
                    error = %e,
                    preview = %truncate_for_log(&raw, 300),
                    "Completion has no parsable JSON array; returning raw text"
                );
            }
            Vec::new()
        }
    };
    let parsed = candidates.len();

    if candidates.is_empty() {
        return Ok(FetchReport {
            raw,
            parsed,
            saved: Vec::new(),
        });
    }

    let accepted = match policy {
        Some(policy) => dedupe_with(&candidates, policy),
        None => candidates,
    };

    let saved: Vec<StoredNewsItem> = stream::iter(accepted.into_iter().map(StoredNewsItem::from_candidate))
        .then(|item| async move {
            store.transact(&item).await?;
            Ok::<_, NewsError>(item)
        })
        .try_collect()
        .await?;

    if saved.is_empty() {
        info!("No unique news items to save after filtering for variety");
    } else {
        info!(
            saved = saved.len(),
            total = parsed,
            "Saved {} unique news items (filtered from {} total)",
            saved.len(),
            parsed
        );
    }

    Ok(FetchReport { raw, parsed, saved })
}

/// Summarize the article at `url` in two or three sentences.
///
/// # Arguments
///
/// * `asker` - Completion client
/// * `url` - Absolute article URL; surrounding whitespace is ignored
///
/// # Returns
///
/// The summary text with any code fence removed.
///
/// # Errors
///
/// [`NewsError::MissingUrl`] for an empty URL, [`NewsError::InvalidUrl`] when
/// it does not parse, and any failure of the completion request.
#[instrument(level = "info", skip(asker))]
pub async fn summarize_article<A>(asker: &A, url: &str) -> Result<String, NewsError>
where
    A: AskAsync<Response = String>,
{
    let url = url.trim();
    if url.is_empty() {
        return Err(NewsError::MissingUrl);
    }
    Url::parse(url).map_err(|source| NewsError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let reply = asker.ask(&summary_prompt(url)).await?;
    let summary = strip_code_fence(&reply, &["markdown", "text"]).to_string();
    info!(bytes = summary.len(), "Summarized article");
    Ok(summary)
}
