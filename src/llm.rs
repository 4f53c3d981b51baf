//! LLM completion backend for the pipeline nodes.

use crate::config::LlmSettings;
use crate::error::{Result, TldwError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Trait for chat completion backends.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Run a single completion and return the assistant's text.
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String>;
}

/// Completion backend for OpenAI-compatible providers.
pub struct OpenAiModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiModel {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            client: create_client(settings),
            model: settings.model.clone(),
            temperature: settings.temperature,
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAiModel {
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(system) = system {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.to_string())
                    .build()
                    .map_err(|e| TldwError::Llm(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| TldwError::Llm(e.to_string()))?
                .into(),
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| TldwError::Llm(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| TldwError::Llm(format!("Completion request failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| TldwError::Llm("Empty response from LLM".to_string()))?
            .clone();

        debug!("LLM response ({} chars)", content.len());

        Ok(content)
    }
}

/// Extract and deserialize a JSON object embedded in an LLM response.
///
/// Models routinely wrap structured output in prose or markdown fences, so
/// the parse is attempted on the outermost `{...}` span.
pub fn extract_json<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json_start = response.find('{');
    let json_end = response.rfind('}');

    let json_str = match (json_start, json_end) {
        (Some(start), Some(end)) if end > start => &response[start..=end],
        _ => response,
    };

    serde_json::from_str(json_str).map_err(|e| {
        TldwError::Llm(format!(
            "Failed to parse structured output: {}. Response was: {}",
            e,
            &response[..response.len().min(500)]
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct ExtractedVideoId {
        video_id: String,
    }

    #[test]
    fn test_extract_json_plain() {
        let response = r#"{"video_id": "dQw4w9WgXcQ"}"#;
        let parsed: ExtractedVideoId = extract_json(response).unwrap();
        assert_eq!(parsed.video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_json_with_markdown() {
        let response = r#"Here is the ID:

```json
{"video_id": "dQw4w9WgXcQ"}
```

Let me know if you need anything else."#;
        let parsed: ExtractedVideoId = extract_json(response).unwrap();
        assert_eq!(parsed.video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_json_invalid() {
        let result: Result<ExtractedVideoId> = extract_json("no json here");
        assert!(result.is_err());
    }
}
