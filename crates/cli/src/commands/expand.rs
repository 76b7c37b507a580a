//! `docweave expand` — expand a message and print the result.
//!
//! A collapsed single-text-block result is printed as plain text; a
//! multi-part result is printed as the model-facing JSON payload.

use docweave_config::AppConfig;
use docweave_core::ExpandedMessage;
use docweave_expander::MessageExpander;
use std::path::PathBuf;

pub async fn run(
    message: Option<String>,
    prompt_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let message = match (message, prompt_file) {
        (Some(message), _) => message,
        (None, Some(path)) => tokio::fs::read_to_string(&path).await?,
        (None, None) => return Err("provide a message or --prompt-file".into()),
    };

    let config = AppConfig::load()?;
    let expander = MessageExpander::from_config(&config)?;
    let expanded = expander.expand(&message).await?;

    match expanded {
        ExpandedMessage::Text(text) => println!("{text}"),
        blocks => println!("{}", serde_json::to_string_pretty(&blocks.to_payload())?),
    }

    Ok(())
}
