//! Data models for news candidates and the rows kept in the store.
//!
//! - [`NewsCandidate`]: one article as parsed out of the completion text
//! - [`StoredNewsItem`]: a candidate that survived filtering, with an id
//! - [`FetchReport`]: what a single fetch produced
//!
//! Candidates come from free-form model output, so every field is read
//! leniently: absent, `null`, or non-string values become empty strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Placeholder written when a candidate has no title.
pub const NO_TITLE: &str = "No title";
/// Placeholder written when a candidate has no excerpt.
pub const NO_EXCERPT: &str = "No description available";
/// Placeholder written when a candidate has no source.
pub const UNKNOWN_SOURCE: &str = "Unknown source";
/// Category assumed when a candidate has none.
pub const DEFAULT_CATEGORY: &str = "general";

/// A news article as returned by the completion API, before filtering.
///
/// Only `title` and `category` take part in topic matching; the other
/// fields are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsCandidate {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
}

impl NewsCandidate {
    /// Candidate with only a title and category set.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Self::default()
        }
    }
}

/// Accept any JSON value, keeping strings and mapping everything else to `""`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

/// A filtered news item as written to the store.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoredNewsItem {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub source: String,
    pub url: String,
    pub date: String,
    pub category: String,
    pub saved_at: DateTime<Utc>,
}

impl StoredNewsItem {
    /// Build the store row for an accepted candidate, assigning a fresh id
    /// and filling empty fields with their placeholders.
    pub fn from_candidate(candidate: NewsCandidate) -> Self {
        fn or(value: String, fallback: &str) -> String {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value
            }
        }

        Self {
            id: Uuid::new_v4(),
            title: or(candidate.title, NO_TITLE),
            excerpt: or(candidate.excerpt, NO_EXCERPT),
            source: or(candidate.source, UNKNOWN_SOURCE),
            url: candidate.url,
            date: candidate.date,
            category: or(candidate.category, DEFAULT_CATEGORY),
            saved_at: Utc::now(),
        }
    }
}

/// Outcome of one fetch.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// The completion text exactly as received, for display.
    pub raw: String,
    /// How many candidates were parsed out of `raw`.
    pub parsed: usize,
    /// Rows written to the store, in acceptance order.
    pub saved: Vec<StoredNewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_deserialization() {
        let json = r#"{
            "title": "City council approves new budget plan",
            "excerpt": "The council voted 7-2.",
            "source": "example.com",
            "url": "https://example.com/budget",
            "date": "2025-05-06",
            "category": "politics"
        }"#;
        let c: NewsCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(c.title, "City council approves new budget plan");
        assert_eq!(c.category, "politics");
        assert_eq!(c.date, "2025-05-06");
    }

    #[test]
    fn test_candidate_missing_fields_are_empty() {
        let c: NewsCandidate = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(c.title, "Only a title");
        assert_eq!(c.category, "");
        assert_eq!(c.url, "");
    }

    #[test]
    fn test_candidate_non_string_fields_are_coerced() {
        let json = r#"{"title": 42, "category": null, "source": ["a"], "url": {"href": "x"}}"#;
        let c: NewsCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(c, NewsCandidate::default());
    }

    #[test]
    fn test_stored_item_placeholders() {
        let item = StoredNewsItem::from_candidate(NewsCandidate::default());
        assert_eq!(item.title, NO_TITLE);
        assert_eq!(item.excerpt, NO_EXCERPT);
        assert_eq!(item.source, UNKNOWN_SOURCE);
        assert_eq!(item.url, "");
        assert_eq!(item.date, "");
        assert_eq!(item.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_stored_item_keeps_values_and_category_casing() {
        let mut c = NewsCandidate::new("Local Theater Hosts Jazz Festival", "Culture/Arts");
        c.url = "https://example.com/jazz".to_string();
        let item = StoredNewsItem::from_candidate(c);
        assert_eq!(item.title, "Local Theater Hosts Jazz Festival");
        assert_eq!(item.category, "Culture/Arts");
        assert_eq!(item.url, "https://example.com/jazz");
    }

    #[test]
    fn test_stored_items_get_distinct_ids() {
        let a = StoredNewsItem::from_candidate(NewsCandidate::new("a", "x"));
        let b = StoredNewsItem::from_candidate(NewsCandidate::new("a", "x"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_stored_item_serialization() {
        let item = StoredNewsItem::from_candidate(NewsCandidate::new("Title here", "sports"));
        let json = serde_json::to_string(&item).unwrap();
        let back: StoredNewsItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
