//! Prompt templates for the summarization pipeline.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single system/user prompt pair.
///
/// The system prompt is optional; most pipeline nodes only need a user turn.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptTemplate {
    pub system: Option<String>,
    pub user: String,
}

/// Collection of all prompt templates, one per LLM pipeline node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub video_id: PromptTemplate,
    pub summary: PromptTemplate,
    pub keyword: PromptTemplate,
    pub questions: PromptTemplate,
    pub next_steps: PromptTemplate,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            video_id: PromptTemplate {
                system: None,
                user: r#"Extract the video ID from the following YouTube URL: {{video_url}}
Respond with a JSON object of the form {"video_id": "..."}.
Return only the JSON object, nothing else."#
                    .to_string(),
            },
            summary: PromptTemplate {
                system: None,
                user: r#"Summarize the following transcript in a concise manner:
{{transcript}}"#
                    .to_string(),
            },
            keyword: PromptTemplate {
                system: None,
                user: r#"Extract the most relevant keyword from the following transcript:
{{transcript}}
The keyword should be a single word or a short phrase that best represents the main topic of the transcript.
For example, if the video is about React basics, return "React".
Return only the keyword."#
                    .to_string(),
            },
            questions: PromptTemplate {
                system: None,
                user: r#"Generate 5 questions based on the following summary:
{{summary}}"#
                    .to_string(),
            },
            next_steps: PromptTemplate {
                system: None,
                user: r#"Based on the following summary, suggest the next steps:
{{summary}}
For example, if the video is about React basics, suggest learning about state management or hooks."#
                    .to_string(),
            },
            variables: std::collections::HashMap::new(),
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with optional custom directory and variables.
    ///
    /// Each pipeline node prompt can be overridden by a `<node>.toml` file in
    /// the custom directory.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            for (name, slot) in [
                ("video_id", &mut prompts.video_id),
                ("summary", &mut prompts.summary),
                ("keyword", &mut prompts.keyword),
                ("questions", &mut prompts.questions),
                ("next_steps", &mut prompts.next_steps),
            ] {
                let path = custom_path.join(format!("{}.toml", name));
                if path.exists() {
                    let content = std::fs::read_to_string(&path)?;
                    *slot = toml::from_str(&content)?;
                }
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.summary.user.contains("{{transcript}}"));
        assert!(prompts.questions.user.contains("{{summary}}"));
        assert!(prompts.video_id.user.contains("{{video_url}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Summarize {{title}} in {{count}} sentences.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("title".to_string(), "the video".to_string());
        vars.insert("count".to_string(), "3".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Summarize the video in 3 sentences.");
    }

    #[test]
    fn test_custom_variables_are_overridden_by_provided() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("tone".to_string(), "formal".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("tone".to_string(), "casual".to_string());

        let result = prompts.render_with_custom("Use a {{tone}} tone.", &vars);
        assert_eq!(result, "Use a casual tone.");
    }
}
