//! tldw - Too long; didn't watch
//!
//! A small orchestration service that summarizes YouTube videos with an LLM.
//!
//! # Overview
//!
//! Given a video URL, tldw fetches the transcript and runs a fixed task
//! graph of LLM calls and lookups to produce:
//! - A concise summary of the transcript
//! - The most relevant keyword
//! - Suggested related videos for that keyword
//! - Follow-up questions based on the summary
//! - Next-step recommendations based on the summary
//!
//! The result is exposed through `POST /summarizer` on the HTTP server, or
//! one-shot via the `summarize` CLI command.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `llm` - Chat completion backend (any OpenAI-compatible provider)
//! - `transcript` - YouTube caption fetching
//! - `search` - Related-video lookup
//! - `pipeline` - The task graph and its per-request state
//! - `cli` - Command-line interface and the HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use tldw::config::Settings;
//! use tldw::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings)?;
//!
//!     let state = pipeline
//!         .run("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     println!("{}", state.summary.unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod openai;
pub mod pipeline;
pub mod search;
pub mod transcript;

pub use error::{Result, TldwError};
