//! Confluence wiki page loader.
//!
//! Recognizes URLs under the configured wiki base URL and fetches the page
//! body through the Confluence REST API with basic auth. Page IDs live in
//! the URL path as `…/pages/<id>/…`.

use async_trait::async_trait;
use docweave_config::WikiConfig;
use docweave_core::{ContentLoader, LoadedDocument, LoaderError, LoaderOptions};

use crate::html::html_to_text;

pub struct WikiLoader {
    base_url: Option<String>,
    username: Option<String>,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl WikiLoader {
    pub fn new(config: &WikiConfig, client: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            api_token: config.api_token.clone(),
            client,
        }
    }

    /// Extract the numeric page ID from a wiki URL.
    ///
    /// Accepts any path shape that contains a `pages/<digits>` segment pair,
    /// e.g. `…/spaces/DEV/pages/123456/Release+Notes`.
    fn page_id(locator: &str) -> Option<&str> {
        let path = locator.split(['?', '#']).next().unwrap_or(locator);
        let mut segments = path.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segment == "pages"
                && let Some(next) = segments.peek()
                && !next.is_empty()
                && next.bytes().all(|b| b.is_ascii_digit())
            {
                return Some(*next);
            }
        }
        None
    }
}

#[async_trait]
impl ContentLoader for WikiLoader {
    fn name(&self) -> &str {
        "wiki"
    }

    fn is_target(&self, locator: &str) -> bool {
        // No base URL configured means this loader never matches.
        self.base_url
            .as_deref()
            .is_some_and(|base| locator.starts_with(base))
    }

    async fn load(
        &self,
        locator: &str,
        _options: &LoaderOptions,
    ) -> Result<LoadedDocument, LoaderError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| LoaderError::NotConfigured("wiki base URL".into()))?;
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| LoaderError::NotConfigured("wiki username".into()))?;
        let api_token = self
            .api_token
            .as_deref()
            .ok_or_else(|| LoaderError::NotConfigured("wiki API token".into()))?;

        let page_id = Self::page_id(locator).ok_or_else(|| LoaderError::InvalidLocator {
            loader: "wiki".into(),
            locator: locator.to_string(),
            reason: "no pages/<id> segment in URL".into(),
        })?;

        let url = format!("{base}/rest/api/content/{page_id}?expand=body.storage");
        tracing::debug!(page_id, "fetching wiki page");

        let response = self
            .client
            .get(&url)
            .basic_auth(username, Some(api_token))
            .send()
            .await
            .map_err(|e| LoaderError::Network {
                loader: "wiki".into(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Api {
                loader: "wiki".into(),
                status_code: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").into(),
            });
        }

        let page: serde_json::Value = response.json().await.map_err(|e| LoaderError::Network {
            loader: "wiki".into(),
            reason: e.to_string(),
        })?;

        let title = page["title"].as_str().map(str::to_string);
        let storage = page["body"]["storage"]["value"].as_str().unwrap_or_default();
        Ok(LoadedDocument {
            title,
            body: html_to_text(storage),
        })
    }
}
