//! Related-video lookup via YouTube search results.
//!
//! YouTube has no unauthenticated search API; like the scrapers it replaces,
//! this module fetches the results page and reads the embedded
//! `ytInitialData` JSON blob.

use crate::config::SearchSettings;
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::info;

const RESULTS_URL: &str = "https://www.youtube.com/results";

static YT_INITIALDATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script[^>]*>\s*var\s+ytInitialData\s*=\s*(\{.*?\});\s*</script>").unwrap()
});

/// Trait for video search providers.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for videos matching a keyword, returning watch URLs.
    async fn search(&self, keyword: &str) -> Result<Vec<String>>;
}

/// Video search backed by the public YouTube results page.
pub struct YoutubeSearch {
    client: reqwest::Client,
    max_results: usize,
}

impl YoutubeSearch {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            max_results: settings.max_results,
        }
    }
}

impl Default for YoutubeSearch {
    fn default() -> Self {
        Self::new(&SearchSettings::default())
    }
}

#[async_trait]
impl VideoSearch for YoutubeSearch {
    async fn search(&self, keyword: &str) -> Result<Vec<String>> {
        let html = self
            .client
            .get(RESULTS_URL)
            .query(&[("search_query", keyword)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()
            .map_err(|e| TldwError::Search(format!("Results page request failed: {}", e)))?
            .text()
            .await?;

        let urls = parse_search_results(&html, self.max_results)?;

        info!("Found {} suggestions for keyword '{}'", urls.len(), keyword);

        Ok(urls)
    }
}

/// Parse watch URLs out of a YouTube search results page.
pub fn parse_search_results(html: &str, max_results: usize) -> Result<Vec<String>> {
    let captures = YT_INITIALDATA_RE.captures(html).ok_or_else(|| {
        TldwError::Search("ytInitialData not found, page structure might have changed".to_string())
    })?;

    let json: Value = serde_json::from_str(&captures[1])
        .map_err(|e| TldwError::Search(format!("Failed to parse ytInitialData: {}", e)))?;

    let sections = json["contents"]["twoColumnSearchResultsRenderer"]["primaryContents"]
        ["sectionListRenderer"]["contents"]
        .as_array()
        .ok_or_else(|| {
            TldwError::Search(
                "Unexpected ytInitialData shape at sectionListRenderer.contents".to_string(),
            )
        })?;

    let mut urls = Vec::new();

    for section in sections {
        let Some(items) = section["itemSectionRenderer"]["contents"].as_array() else {
            continue;
        };
        for item in items {
            // Skip ads, shelves and channel results; only videoRenderer
            // entries carry a watch URL.
            if let Some(video_id) = item["videoRenderer"]["videoId"].as_str() {
                urls.push(format!("https://www.youtube.com/watch?v={}", video_id));
                if urls.len() >= max_results {
                    return Ok(urls);
                }
            }
        }
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_page(ids: &[&str]) -> String {
        let renderers: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"videoRenderer": {{"videoId": "{}"}}}}"#, id))
            .collect();
        format!(
            r#"<html><script nonce="x">var ytInitialData = {{"contents": {{"twoColumnSearchResultsRenderer": {{"primaryContents": {{"sectionListRenderer": {{"contents": [{{"itemSectionRenderer": {{"contents": [{{"adSlotRenderer": {{}}}}, {}]}}}}]}}}}}}}}}};</script></html>"#,
            renderers.join(", ")
        )
    }

    #[test]
    fn test_parse_search_results() {
        let html = results_page(&["dQw4w9WgXcQ", "abc123def45", "xyz987wvu65"]);
        let urls = parse_search_results(&html, 2).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                "https://www.youtube.com/watch?v=abc123def45".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_skips_non_video_items() {
        let html = results_page(&["dQw4w9WgXcQ"]);
        let urls = parse_search_results(&html, 5).unwrap();
        assert_eq!(urls.len(), 1);
    }

    #[test]
    fn test_parse_missing_initialdata() {
        let result = parse_search_results("<html><body>nope</body></html>", 2);
        assert!(result.is_err());
    }
}
