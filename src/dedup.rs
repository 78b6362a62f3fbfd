//! Topic deduplication for a freshly fetched list of news candidates.
//!
//! The completion API is unreliable about giving every article its own
//! category, and rewrites of the same story rarely share a title. Two gates
//! are applied, in order, to every candidate:
//!
//! 1. **Category or topic key**: reject when the normalized category, or the
//!    topic key (first three long title tokens), was already accepted.
//! 2. **Title overlap**: reject when at least two of the candidate's long
//!    tokens occur as substrings of an already accepted title.
//!
//! The filter leans toward over-rejection. That suits "ten varied headlines",
//! not search ranking.
//!
//! # Known weaknesses
//!
//! - Candidates without a category all normalize to `"general"`, so only the
//!   first of them can ever be accepted.
//! - Titles with no long tokens share the empty topic key, so only the first
//!   of them can ever be accepted.
//!
//! Both are kept as-is; the tests pin them down.

use crate::models::{NewsCandidate, DEFAULT_CATEGORY};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Thresholds for the two gates.
///
/// All lengths are counted in `char`s and are exclusive lower bounds: a token
/// must be *longer* than the value to qualify.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DedupPolicy {
    /// Tokens of this length or shorter are dropped from the signature.
    pub min_token_chars: usize,
    /// Number of leading tokens joined into the topic key.
    pub topic_key_tokens: usize,
    /// Tokens of this length or shorter never count toward title overlap.
    pub overlap_token_chars: usize,
    /// Overlapping tokens needed to call two titles near-duplicates.
    pub overlap_threshold: usize,
    /// Category used when a candidate has none.
    pub default_category: String,
}

impl Default for DedupPolicy {
    fn default() -> Self {
        Self {
            min_token_chars: 4,
            topic_key_tokens: 3,
            overlap_token_chars: 5,
            overlap_threshold: 2,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Normalized view of a candidate, computed once before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSignature {
    /// Lower-cased category, or the policy default when empty.
    pub category: String,
    /// Lower-cased title tokens longer than `min_token_chars`, in title order.
    pub tokens: Vec<String>,
    /// The first `topic_key_tokens` tokens joined by single spaces.
    pub topic_key: String,
}

impl TopicSignature {
    pub fn of(candidate: &NewsCandidate, policy: &DedupPolicy) -> Self {
        let category = if candidate.category.is_empty() {
            policy.default_category.to_lowercase()
        } else {
            candidate.category.to_lowercase()
        };

        let tokens: Vec<String> = candidate
            .title
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.chars().count() > policy.min_token_chars)
            .map(str::to_string)
            .collect();

        let topic_key = tokens.iter().take(policy.topic_key_tokens).join(" ");

        Self {
            category,
            tokens,
            topic_key,
        }
    }
}

/// Why a candidate was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    DuplicateCategory,
    DuplicateTopicKey,
    /// Overlaps the accepted item at index `of` of the accepted list.
    NearDuplicate { of: usize },
}

#[derive(Debug, Clone)]
struct Accepted {
    candidate: NewsCandidate,
    lowered_title: String,
}

/// Running state of one dedup scan.
///
/// Each call to [`DedupState::offer`] consumes the state and returns the next
/// one, so a scan is a plain `fold` with nothing shared between scans.
#[derive(Debug, Clone, Default)]
pub struct DedupState {
    accepted: Vec<Accepted>,
    categories: HashSet<String>,
    topic_keys: HashSet<String>,
}

impl DedupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what to do with a candidate given everything accepted so far.
    pub fn judge(&self, signature: &TopicSignature, policy: &DedupPolicy) -> Verdict {
        if self.categories.contains(&signature.category) {
            return Verdict::DuplicateCategory;
        }
        if self.topic_keys.contains(&signature.topic_key) {
            return Verdict::DuplicateTopicKey;
        }

        let near = self.accepted.iter().position(|existing| {
            let common = signature
                .tokens
                .iter()
                .filter(|token| {
                    existing.lowered_title.contains(token.as_str())
                        && token.chars().count() > policy.overlap_token_chars
                })
                .count();
            common >= policy.overlap_threshold
        });

        match near {
            Some(of) => Verdict::NearDuplicate { of },
            None => Verdict::Accept,
        }
    }

    /// Judge `candidate` and, if accepted, record it.
    pub fn offer(mut self, candidate: &NewsCandidate, policy: &DedupPolicy) -> Self {
        let signature = TopicSignature::of(candidate, policy);
        match self.judge(&signature, policy) {
            Verdict::Accept => {
                self.accepted.push(Accepted {
                    candidate: candidate.clone(),
                    lowered_title: candidate.title.to_lowercase(),
                });
                self.categories.insert(signature.category);
                self.topic_keys.insert(signature.topic_key);
            }
            verdict => {
                debug!(title = %candidate.title, category = %signature.category, ?verdict, "Rejected candidate");
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// The accepted candidates, in the order they were offered.
    pub fn into_accepted(self) -> Vec<NewsCandidate> {
        self.accepted.into_iter().map(|a| a.candidate).collect()
    }
}

/// Filter `candidates` down to distinct topics using the default policy.
pub fn dedupe(candidates: &[NewsCandidate]) -> Vec<NewsCandidate> {
    dedupe_with(candidates, &DedupPolicy::default())
}

/// Filter `candidates` down to distinct topics.
///
/// The result is a subsequence of the input in the original order. The input
/// is left untouched.
#[instrument(level = "debug", skip_all, fields(total = candidates.len()))]
pub fn dedupe_with(candidates: &[NewsCandidate], policy: &DedupPolicy) -> Vec<NewsCandidate> {
    let state = candidates
        .iter()
        .fold(DedupState::new(), |state, candidate| state.offer(candidate, policy));

    info!(
        accepted = state.len(),
        total = candidates.len(),
        "Filtered news candidates for variety"
    );
    state.into_accepted()
}
