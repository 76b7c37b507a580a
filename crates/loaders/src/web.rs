//! Generic web page loader.
//!
//! The catch-all for `http`/`https` locators. Must be registered after
//! every more specific URL loader, since its predicate matches them all.

use async_trait::async_trait;
use docweave_core::{ContentLoader, LoadedDocument, LoaderError, LoaderOptions};

use crate::html::{extract_title, html_to_text};

/// Title reported for pages that have none.
const UNTITLED: &str = "Untitled";

pub struct WebLoader {
    client: reqwest::Client,
}

impl WebLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentLoader for WebLoader {
    fn name(&self) -> &str {
        "web"
    }

    fn is_target(&self, locator: &str) -> bool {
        locator.starts_with("http://") || locator.starts_with("https://")
    }

    async fn load(
        &self,
        locator: &str,
        _options: &LoaderOptions,
    ) -> Result<LoadedDocument, LoaderError> {
        tracing::debug!(url = locator, "fetching web page");

        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|e| LoaderError::Network {
                loader: "web".into(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Api {
                loader: "web".into(),
                status_code: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").into(),
            });
        }

        let html = response.text().await.map_err(|e| LoaderError::Network {
            loader: "web".into(),
            reason: e.to_string(),
        })?;

        let title = extract_title(&html).unwrap_or_else(|| UNTITLED.to_string());
        Ok(LoadedDocument {
            title: Some(title),
            body: html_to_text(&html),
        })
    }
}
