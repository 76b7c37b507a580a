//! YouTube transcript loader.
//!
//! Recognizes `www.youtube.com` watch URLs and fetches the caption track
//! through the public `timedtext` endpoint, trying each configured language
//! in preference order.

use async_trait::async_trait;
use docweave_config::LoadersConfig;
use docweave_core::{ContentLoader, LoadedDocument, LoaderError, LoaderOptions};

use crate::html::html_to_text;

pub struct YoutubeLoader {
    languages: Vec<String>,
    client: reqwest::Client,
}

impl YoutubeLoader {
    pub fn new(config: &LoadersConfig, client: reqwest::Client) -> Self {
        Self {
            languages: config.transcript_languages.clone(),
            client,
        }
    }

    fn host(locator: &str) -> Option<&str> {
        let rest = locator
            .strip_prefix("https://")
            .or_else(|| locator.strip_prefix("http://"))?;
        rest.split(['/', '?', '#']).next()
    }

    /// Extract the `v=` query parameter from a watch URL.
    fn video_id(locator: &str) -> Option<&str> {
        let (_, query) = locator.split_once('?')?;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
            .filter(|id| !id.is_empty())
    }
}

#[async_trait]
impl ContentLoader for YoutubeLoader {
    fn name(&self) -> &str {
        "youtube"
    }

    fn is_target(&self, locator: &str) -> bool {
        Self::host(locator) == Some("www.youtube.com")
    }

    async fn load(
        &self,
        locator: &str,
        _options: &LoaderOptions,
    ) -> Result<LoadedDocument, LoaderError> {
        let video_id = Self::video_id(locator).ok_or_else(|| LoaderError::InvalidLocator {
            loader: "youtube".into(),
            locator: locator.to_string(),
            reason: "no v= query parameter".into(),
        })?;

        for lang in &self.languages {
            let url = format!("https://www.youtube.com/api/timedtext?lang={lang}&v={video_id}");
            tracing::debug!(video_id, lang, "fetching transcript");

            let response =
                self.client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| LoaderError::Network {
                        loader: "youtube".into(),
                        reason: e.to_string(),
                    })?;

            if !response.status().is_success() {
                continue;
            }

            let xml = response.text().await.map_err(|e| LoaderError::Network {
                loader: "youtube".into(),
                reason: e.to_string(),
            })?;

            let transcript = transcript_text(&xml);
            if !transcript.is_empty() {
                return Ok(LoadedDocument::new(transcript));
            }
        }

        Err(LoaderError::EmptyDocument {
            loader: "youtube".into(),
            locator: locator.to_string(),
        })
    }
}

/// Flatten a timedtext XML document into caption lines.
fn transcript_text(xml: &str) -> String {
    let mut lines = Vec::new();
    let mut rest = xml;
    while let Some(open) = rest.find("<text") {
        let Some(tag_end) = rest[open..].find('>') else {
            break;
        };
        let content_start = open + tag_end + 1;
        let Some(close) = rest[content_start..].find("</text>") else {
            break;
        };
        let line = html_to_text(&rest[content_start..content_start + close]);
        if !line.is_empty() {
            lines.push(line);
        }
        rest = &rest[content_start + close + "</text>".len()..];
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> YoutubeLoader {
        YoutubeLoader::new(&LoadersConfig::default(), reqwest::Client::new())
    }

    #[test]
    fn matches_youtube_host_only() {
        let loader = loader();
        assert!(loader.is_target("https://www.youtube.com/watch?v=abc123"));
        assert!(!loader.is_target("https://youtu.be/abc123"));
        assert!(!loader.is_target("https://example.com/watch?v=abc123"));
    }

    #[test]
    fn video_id_from_query() {
        assert_eq!(
            YoutubeLoader::video_id("https://www.youtube.com/watch?v=abc123"),
            Some("abc123")
        );
        assert_eq!(
            YoutubeLoader::video_id("https://www.youtube.com/watch?t=10&v=xyz"),
            Some("xyz")
        );
        assert_eq!(YoutubeLoader::video_id("https://www.youtube.com/watch"), None);
    }

    #[tokio::test]
    async fn load_rejects_url_without_video_id() {
        let err = loader()
            .load("https://www.youtube.com/feed", &LoaderOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidLocator { .. }));
    }

    #[test]
    fn transcript_flattened_from_xml() {
        let xml = r#"<transcript><text start="0.0" dur="1.2">Hello &amp; welcome</text><text start="1.2" dur="2.0">to the show</text></transcript>"#;
        assert_eq!(transcript_text(xml), "Hello & welcome\nto the show");
    }

    #[test]
    fn empty_transcript_yields_empty_string() {
        assert_eq!(transcript_text("<transcript></transcript>"), "");
    }
}
