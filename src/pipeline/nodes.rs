//! The individual pipeline nodes.
//!
//! Each node consumes fields the previous level produced and returns exactly
//! one new value; `Pipeline::run` wires them together.

use super::Pipeline;
use crate::error::{Result, TldwError};
use crate::llm::extract_json;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Matches YouTube URL formats and bare 11-character video IDs.
static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:
            (?:https?://)?
            (?:www\.)?
            (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
            ([a-zA-Z0-9_-]{11})
        )
        |
        ^([a-zA-Z0-9_-]{11})$
    ",
    )
    .expect("Invalid regex")
});

/// Structured output of the video-ID extraction node.
#[derive(Debug, Deserialize)]
struct ExtractedVideoId {
    video_id: String,
}

impl Pipeline {
    /// Extract the video ID from the URL via the LLM, falling back to a
    /// direct regex parse when the structured output is unusable.
    pub(super) async fn extract_video_id(&self, video_url: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("video_url".to_string(), video_url.to_string());

        let prompt = &self.prompts.video_id;
        let user = self.prompts.render_with_custom(&prompt.user, &vars);

        let response = self.model.complete(prompt.system.as_deref(), &user).await?;

        match extract_json::<ExtractedVideoId>(&response) {
            Ok(extracted) if looks_like_video_id(&extracted.video_id) => Ok(extracted.video_id),
            other => {
                if let Err(e) = other {
                    warn!("Structured video-ID extraction failed, trying URL parse: {}", e);
                }
                parse_video_id(video_url).ok_or_else(|| {
                    TldwError::InvalidInput(format!(
                        "Could not extract a video ID from: {}",
                        video_url
                    ))
                })
            }
        }
    }

    /// Summarize the transcript.
    pub(super) async fn summarize_transcript(&self, transcript: &str) -> Result<String> {
        self.complete_node(
            &self.prompts.summary.user,
            self.prompts.summary.system.as_deref(),
            "transcript",
            transcript,
        )
        .await
    }

    /// Extract the most relevant keyword from the transcript.
    pub(super) async fn find_keyword(&self, transcript: &str) -> Result<String> {
        let keyword = self
            .complete_node(
                &self.prompts.keyword.user,
                self.prompts.keyword.system.as_deref(),
                "transcript",
                transcript,
            )
            .await?;
        Ok(keyword.trim().to_string())
    }

    /// Generate follow-up questions from the summary.
    pub(super) async fn generate_questions(&self, summary: &str) -> Result<String> {
        self.complete_node(
            &self.prompts.questions.user,
            self.prompts.questions.system.as_deref(),
            "summary",
            summary,
        )
        .await
    }

    /// Suggest next steps from the summary.
    pub(super) async fn next_steps(&self, summary: &str) -> Result<String> {
        self.complete_node(
            &self.prompts.next_steps.user,
            self.prompts.next_steps.system.as_deref(),
            "summary",
            summary,
        )
        .await
    }

    /// Render a single-variable prompt and run it through the model.
    async fn complete_node(
        &self,
        template: &str,
        system: Option<&str>,
        var: &str,
        value: &str,
    ) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert(var.to_string(), value.to_string());

        let user = self.prompts.render_with_custom(template, &vars);
        self.model.complete(system, &user).await
    }
}

/// Extract a video ID from a YouTube URL or bare ID.
pub fn parse_video_id(input: &str) -> Option<String> {
    let caps = VIDEO_ID_RE.captures(input.trim())?;

    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn looks_like_video_id(candidate: &str) -> bool {
    candidate.len() == 11
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
