//! # docweave Loaders
//!
//! Network content loaders: Confluence wiki pages, generic web pages, and
//! YouTube transcripts. Local files (text, images, PDFs) are handled by the
//! assembler in `docweave-expander`, not through a loader — they need no
//! network access.

pub mod html;
pub mod web;
pub mod wiki;
pub mod youtube;

pub use web::WebLoader;
pub use wiki::WikiLoader;
pub use youtube::YoutubeLoader;

use std::time::Duration;

use docweave_config::AppConfig;
use docweave_core::{Error, LoaderRegistry};

/// Build the default loader registry from configuration.
///
/// Registration order is load-bearing: the wiki and transcript predicates
/// are both subsets of the web predicate, so the generic web loader must
/// come last or it would capture every URL.
pub fn default_registry(config: &AppConfig) -> Result<LoaderRegistry, Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.loaders.timeout_secs))
        .user_agent(concat!("docweave/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

    let mut registry = LoaderRegistry::new();
    registry.register(Box::new(WikiLoader::new(&config.wiki, client.clone())));
    registry.register(Box::new(YoutubeLoader::new(&config.loaders, client.clone())));
    registry.register(Box::new(WebLoader::new(client)));
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docweave_config::WikiConfig;

    fn config_with_wiki() -> AppConfig {
        AppConfig {
            wiki: WikiConfig {
                base_url: Some("https://wiki.example.com".into()),
                username: Some("dev@example.com".into()),
                api_token: Some("token".into()),
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn registry_order_is_wiki_youtube_web() {
        let registry = default_registry(&config_with_wiki()).unwrap();
        assert_eq!(registry.names(), vec!["wiki", "youtube", "web"]);
    }

    #[test]
    fn wiki_url_routes_to_wiki_not_web() {
        let registry = default_registry(&config_with_wiki()).unwrap();
        let loader = registry
            .resolve("https://wiki.example.com/spaces/DEV/pages/123/Notes")
            .unwrap();
        assert_eq!(loader.name(), "wiki");
    }

    #[test]
    fn youtube_url_routes_to_youtube_not_web() {
        let registry = default_registry(&AppConfig::default()).unwrap();
        let loader = registry
            .resolve("https://www.youtube.com/watch?v=abc")
            .unwrap();
        assert_eq!(loader.name(), "youtube");
    }

    #[test]
    fn plain_url_falls_through_to_web() {
        let registry = default_registry(&AppConfig::default()).unwrap();
        let loader = registry.resolve("https://example.com/post").unwrap();
        assert_eq!(loader.name(), "web");
    }

    #[test]
    fn local_path_matches_nothing() {
        let registry = default_registry(&AppConfig::default()).unwrap();
        assert!(registry.resolve("notes/report.pdf").is_none());
    }
}
