//! One-shot summarization command.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;

/// Run the full pipeline for a single URL and print the result as JSON.
pub async fn run_summarize(url: &str, pretty: bool, settings: Settings) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(&settings)?;

    let spinner = Output::spinner("Summarizing video...");
    let result = pipeline.run(url).await;
    spinner.finish_and_clear();

    match result {
        Ok(state) => {
            let json = if pretty {
                serde_json::to_string_pretty(&state)?
            } else {
                serde_json::to_string(&state)?
            };
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Summarization failed: {}", e));
            Err(e.into())
        }
    }
}
