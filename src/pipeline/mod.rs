//! The summarization pipeline.
//!
//! A fixed task graph of seven nodes run per request:
//!
//! ```text
//! extract_video_id -> extract_transcript -> {summarize, find_keyword}
//! summarize    -> {generate_questions, next_steps}
//! find_keyword -> video_suggestions
//! ```
//!
//! Nodes at the same level run concurrently; each level starts only after
//! its inputs are populated. Any node failure aborts the run.

mod nodes;

use crate::config::{Prompts, Settings};
use crate::error::{Result, TldwError};
use crate::llm::{CompletionModel, OpenAiModel};
use crate::search::{VideoSearch, YoutubeSearch};
use crate::transcript::{TranscriptSource, YoutubeTranscripts};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Accumulated pipeline state, returned to the caller as JSON.
///
/// Each optional field is written exactly once, by the node that produces it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SummaryState {
    /// The URL of the YouTube video.
    pub video_url: String,
    /// The ID of the YouTube video.
    pub video_id: Option<String>,
    /// The transcript of the video.
    pub transcript: Option<String>,
    /// The summary of the transcript.
    pub summary: Option<String>,
    /// The keyword extracted from the transcript.
    pub keyword: Option<String>,
    /// Suggested related videos for the keyword.
    pub video_suggestions: Option<Vec<String>>,
    /// Follow-up questions based on the summary.
    pub questions: Option<String>,
    /// Suggested next steps based on the summary.
    pub next_steps: Option<String>,
}

/// The summarization pipeline.
pub struct Pipeline {
    model: Arc<dyn CompletionModel>,
    transcripts: Arc<dyn TranscriptSource>,
    search: Arc<dyn VideoSearch>,
    prompts: Prompts,
}

impl Pipeline {
    /// Create a pipeline with the default collaborators.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self {
            model: Arc::new(OpenAiModel::new(&settings.llm)),
            transcripts: Arc::new(YoutubeTranscripts::new(&settings.transcript)),
            search: Arc::new(YoutubeSearch::new(&settings.search)),
            prompts,
        })
    }

    /// Create a pipeline with custom collaborators.
    pub fn with_components(
        model: Arc<dyn CompletionModel>,
        transcripts: Arc<dyn TranscriptSource>,
        search: Arc<dyn VideoSearch>,
        prompts: Prompts,
    ) -> Self {
        Self {
            model,
            transcripts,
            search,
            prompts,
        }
    }

    /// Run the full pipeline for a video URL.
    #[instrument(skip(self), fields(video_url = %video_url))]
    pub async fn run(&self, video_url: &str) -> Result<SummaryState> {
        url::Url::parse(video_url)
            .map_err(|e| TldwError::InvalidInput(format!("Invalid video URL: {}", e)))?;

        let mut state = SummaryState {
            video_url: video_url.to_string(),
            ..SummaryState::default()
        };

        let video_id = self.extract_video_id(video_url).await?;
        info!("Extracted video ID {}", video_id);
        state.video_id = Some(video_id.clone());

        let transcript = self.transcripts.fetch(&video_id).await?;
        state.transcript = Some(transcript.clone());

        let (summary, keyword) = tokio::try_join!(
            self.summarize_transcript(&transcript),
            self.find_keyword(&transcript),
        )?;
        state.summary = Some(summary.clone());
        state.keyword = Some(keyword.clone());

        let (questions, next_steps, suggestions) = tokio::try_join!(
            self.generate_questions(&summary),
            self.next_steps(&summary),
            self.search.search(&keyword),
        )?;
        state.questions = Some(questions);
        state.next_steps = Some(next_steps);
        state.video_suggestions = Some(suggestions);

        info!("Pipeline complete for video {}", video_id);

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Shared call log, used to assert node ordering.
    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    struct MockModel {
        log: CallLog,
        video_id_response: String,
    }

    #[async_trait]
    impl CompletionModel for MockModel {
        async fn complete(&self, _system: Option<&str>, user: &str) -> Result<String> {
            let (label, response) = if user.contains("Extract the video ID") {
                ("video_id", self.video_id_response.clone())
            } else if user.contains("Summarize") {
                ("summary", "A concise summary.".to_string())
            } else if user.contains("keyword") {
                ("keyword", "React".to_string())
            } else if user.contains("5 questions") {
                ("questions", "Q1 through Q5.".to_string())
            } else if user.contains("next steps") {
                ("next_steps", "Learn about hooks.".to_string())
            } else {
                return Err(TldwError::Llm(format!("Unexpected prompt: {}", user)));
            };
            self.log.lock().unwrap().push(label);
            Ok(response)
        }
    }

    struct MockTranscripts {
        log: CallLog,
    }

    #[async_trait]
    impl TranscriptSource for MockTranscripts {
        async fn fetch(&self, video_id: &str) -> Result<String> {
            assert_eq!(video_id, "dQw4w9WgXcQ");
            self.log.lock().unwrap().push("transcript");
            Ok("hello and welcome to this video about react".to_string())
        }
    }

    struct MockSearch {
        log: CallLog,
    }

    #[async_trait]
    impl VideoSearch for MockSearch {
        async fn search(&self, keyword: &str) -> Result<Vec<String>> {
            assert_eq!(keyword, "React");
            self.log.lock().unwrap().push("search");
            Ok(vec![
                "https://www.youtube.com/watch?v=abc123def45".to_string(),
            ])
        }
    }

    fn pipeline_with_log(video_id_response: &str) -> (Pipeline, CallLog) {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::with_components(
            Arc::new(MockModel {
                log: log.clone(),
                video_id_response: video_id_response.to_string(),
            }),
            Arc::new(MockTranscripts { log: log.clone() }),
            Arc::new(MockSearch { log: log.clone() }),
            Prompts::default(),
        );
        (pipeline, log)
    }

    #[tokio::test]
    async fn test_run_populates_all_fields() {
        let (pipeline, _log) = pipeline_with_log(r#"{"video_id": "dQw4w9WgXcQ"}"#);

        let state = pipeline
            .run("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(state.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert!(state.transcript.is_some());
        assert_eq!(state.summary.as_deref(), Some("A concise summary."));
        assert_eq!(state.keyword.as_deref(), Some("React"));
        assert_eq!(state.questions.as_deref(), Some("Q1 through Q5."));
        assert_eq!(state.next_steps.as_deref(), Some("Learn about hooks."));
        assert_eq!(
            state.video_suggestions,
            Some(vec![
                "https://www.youtube.com/watch?v=abc123def45".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_run_respects_node_ordering() {
        let (pipeline, log) = pipeline_with_log(r#"{"video_id": "dQw4w9WgXcQ"}"#);

        pipeline
            .run("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        let log = log.lock().unwrap();
        let pos = |label: &str| log.iter().position(|l| *l == label).unwrap();

        assert_eq!(log.len(), 7);
        assert!(pos("video_id") < pos("transcript"));
        assert!(pos("transcript") < pos("summary"));
        assert!(pos("transcript") < pos("keyword"));
        assert!(pos("summary") < pos("questions"));
        assert!(pos("summary") < pos("next_steps"));
        assert!(pos("keyword") < pos("search"));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_url() {
        let (pipeline, log) = pipeline_with_log(r#"{"video_id": "dQw4w9WgXcQ"}"#);

        let err = pipeline.run("not a url at all").await.unwrap_err();
        assert!(matches!(err, TldwError::InvalidInput(_)));
        // Nothing ran
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_video_id_falls_back_to_regex_on_bad_llm_output() {
        let (pipeline, _log) = pipeline_with_log("I cannot answer that.");

        let state = pipeline
            .run("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(state.video_id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn test_unresolvable_video_id_fails() {
        let (pipeline, _log) = pipeline_with_log("I cannot answer that.");

        let err = pipeline.run("https://example.com/no-video").await.unwrap_err();
        assert!(matches!(err, TldwError::InvalidInput(_)));
    }
}
