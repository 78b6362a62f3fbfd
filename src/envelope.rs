//! Pulling a JSON array of news candidates out of free-form completion text.
//!
//! Models are asked to answer with a bare JSON array but often wrap it in a
//! Markdown code fence or surround it with prose. Parsing is deliberately
//! forgiving about the wrapper and about the shape of each element.

use crate::models::NewsCandidate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Greedy span from the first `[` to the last `]`, across newlines.
static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("JSON array pattern is valid"));

/// Trim `text` and, if it opens with a code fence, drop the fence markers.
///
/// The opening fence may carry one of `languages` as its info string
/// (matched case-insensitively) followed by an optional newline. The closing
/// fence is only removed when it ends the text.
///
/// ```ignore
/// assert_eq!(strip_code_fence("```json\n[1]\n```", &["json"]), "[1]");
/// ```
pub fn strip_code_fence<'a>(text: &'a str, languages: &[&str]) -> &'a str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = languages
        .iter()
        .find_map(|lang| strip_prefix_ignore_case(rest, lang))
        .unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);

    match rest.strip_suffix("```") {
        Some(body) => body.strip_suffix('\n').unwrap_or(body),
        None => rest,
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// The outermost-looking JSON array in `text`, or `text` itself when there
/// is no bracketed span.
pub fn extract_json_array(text: &str) -> &str {
    JSON_ARRAY.find(text).map_or(text, |m| m.as_str())
}

/// Parse the candidates embedded in a news completion.
///
/// Returns `Ok(None)` when the text is valid JSON but not an array. Array
/// elements that are not objects become empty candidates; see
/// [`NewsCandidate`] for per-field coercion.
///
/// # Errors
///
/// The `serde_json` error when the extracted text is not JSON at all.
pub fn parse_candidates(content: &str) -> Result<Option<Vec<NewsCandidate>>, serde_json::Error> {
    let body = extract_json_array(strip_code_fence(content, &["json"]));
    let value: Value = serde_json::from_str(body)?;

    Ok(match value {
        Value::Array(items) => Some(items.into_iter().map(candidate_from_value).collect()),
        _ => None,
    })
}

fn candidate_from_value(value: Value) -> NewsCandidate {
    if value.is_object() {
        serde_json::from_value(value).unwrap_or_default()
    } else {
        NewsCandidate::default()
    }
}
