//! `docweave fetch` — resolve one locator and print the document.
//!
//! Useful for checking loader configuration without composing a message.
//! Network locators go through the registry; an existing local path is read
//! as text.

use docweave_config::AppConfig;
use docweave_core::{LoadedDocument, LoaderOptions};
use docweave_expander::parse_options;
use docweave_loaders::default_registry;
use std::path::{Path, PathBuf};

pub async fn run(
    source: String,
    options: Option<String>,
    output_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = match options {
        Some(raw) => parse_options(&raw).map_err(docweave_core::Error::from)?,
        None => LoaderOptions::new(),
    };

    let config = AppConfig::load()?;
    let registry = default_registry(&config)?;

    let doc = match registry.resolve(&source) {
        Some(loader) => {
            tracing::info!(loader = loader.name(), "resolved locator");
            loader
                .load(&source, &options)
                .await
                .map_err(docweave_core::Error::from)?
        }
        None if Path::new(&source).exists() => {
            let path = Path::new(&source);
            // Local PDFs are rasterized by `expand`, not fetched as text.
            if path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
            {
                return Err(format!(
                    "`fetch` cannot extract text from a local PDF; reference `{source}` from `expand` to rasterize its pages"
                )
                .into());
            }
            let body = tokio::fs::read_to_string(path).await?;
            let title = path.file_name().map(|n| n.to_string_lossy().into_owned());
            LoadedDocument { title, body }
        }
        None => return Err(format!("no loader found for `{source}`").into()),
    };

    let mut rendered = String::new();
    if let Some(title) = &doc.title {
        rendered.push_str(&format!("# {title}\n\n"));
    }
    rendered.push_str(&doc.body);

    match output_file {
        Some(path) => tokio::fs::write(&path, &rendered).await?,
        None => println!("{rendered}"),
    }

    Ok(())
}
