//! Prompt text sent to the completion API.

/// Categories the model is asked to spread the articles across.
pub const CATEGORY_PALETTE: &str = "politics, crime, culture/arts, sports, economy/business, \
local events, social issues, health, education, environment, technology, entertainment, \
real estate, tourism, food/restaurants";

/// Ask for ten recent articles from `location`, each on a different topic,
/// returned as a bare JSON array.
pub fn news_prompt(location: &str) -> String {
    format!(
        r#"Find 10 completely different and diverse news articles from {location} from today or the past few days.

ABSOLUTELY CRITICAL - VARIETY IS MANDATORY:
- Each article MUST be about a COMPLETELY DIFFERENT topic - NO exceptions
- You MUST cover at least 8 different categories from this list: {CATEGORY_PALETTE}
- DO NOT include multiple articles about the same event, even if from different sources
- If you find multiple articles about the same topic (e.g., transport strikes), ONLY include ONE article from that topic
- Actively search for and prioritize articles about DIFFERENT subjects
- Examples of what we want: one article about a crime, one about a cultural event, one about sports, one about politics, one about a business development, one about a social issue, etc.
- If you cannot find 10 different topics, prioritize quality and variety over quantity
- Only include individual news articles, not generic news source pages
- Articles must be from today or very recent (within the last 3-7 days)
- Include articles in any language (Italian, English, etc.)
- Each article should be a specific news story, not a news index page

IMPORTANT: Before including an article, check if you've already included an article about a similar topic. If yes, skip it and find a different topic instead.

For each article, provide:
1. Title of the article
2. A brief excerpt/description (2-3 sentences)
3. The source website name
4. The full URL
5. Publication date if available
6. Category (must be different from other articles' categories)

Format your response as a JSON array with this structure:
[
  {{
    "title": "Article title",
    "excerpt": "Brief description of the article",
    "source": "website.com",
    "url": "https://full-url.com/article",
    "date": "YYYY-MM-DD",
    "category": "politics"
  }}
]

Only return the JSON array, no additional text."#
    )
}

/// Ask for a two-to-three sentence summary of the article at `url`.
pub fn summary_prompt(url: &str) -> String {
    format!(
        "Read the article at this URL: {url}

Provide a brief summary (2-3 sentences) of what this article is about. Focus on the main points and key information. Keep it concise and informative.

Return only the summary text, no additional formatting or explanations."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_prompt_mentions_location_and_schema() {
        let prompt = news_prompt("ROME, ITALY");
        assert!(prompt.contains("news articles from ROME, ITALY from today"));
        assert!(prompt.contains("food/restaurants"));
        assert!(prompt.contains(r#""category": "politics""#));
        assert!(prompt.ends_with("Only return the JSON array, no additional text."));
    }

    #[test]
    fn test_news_prompt_asks_for_varied_multilingual_topics() {
        let prompt = news_prompt("ROME, ITALY");
        let variety = prompt.find("prioritize articles about DIFFERENT subjects").unwrap();
        let examples = prompt
            .find("- Examples of what we want: one article about a crime, one about a cultural event,")
            .unwrap();
        assert!(examples > variety);
        assert!(prompt.contains("one about a business development, one about a social issue, etc.\n"));
        assert!(prompt.contains("- Include articles in any language (Italian, English, etc.)\n"));
    }

    #[test]
    fn test_summary_prompt_mentions_url() {
        let prompt = summary_prompt("https://example.com/story");
        assert!(prompt.starts_with("Read the article at this URL: https://example.com/story\n"));
        assert!(prompt.contains("2-3 sentences"));
    }
}
