//! Configuration management for tldw.

mod prompts;
mod settings;

pub use prompts::{PromptTemplate, Prompts};
pub use settings::{
    GeneralSettings, LlmSettings, PromptSettings, SearchSettings, ServerSettings, Settings,
    TranscriptSettings,
};
