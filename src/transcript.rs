//! Transcript fetching from YouTube's caption service.

use crate::config::TranscriptSettings;
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use tracing::info;
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the full transcript text for a video ID.
    async fn fetch(&self, video_id: &str) -> Result<String>;
}

/// Transcript source backed by YouTube's caption tracks.
pub struct YoutubeTranscripts {
    languages: Vec<String>,
    preserve_formatting: bool,
}

impl YoutubeTranscripts {
    pub fn new(settings: &TranscriptSettings) -> Self {
        Self {
            languages: settings.languages.clone(),
            preserve_formatting: settings.preserve_formatting,
        }
    }
}

impl Default for YoutubeTranscripts {
    fn default() -> Self {
        Self::new(&TranscriptSettings::default())
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    async fn fetch(&self, video_id: &str) -> Result<String> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TldwError::Transcript(e.to_string()))?;

        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let transcript = api
            .fetch_transcript(video_id, &languages, self.preserve_formatting)
            .await
            .map_err(|e| {
                TldwError::Transcript(format!(
                    "No transcript available for video {}: {}",
                    video_id, e
                ))
            })?;

        info!(
            "Fetched transcript for {} ({} snippets, language {})",
            video_id,
            transcript.snippets.len(),
            transcript.language_code
        );

        Ok(transcript.text())
    }
}
