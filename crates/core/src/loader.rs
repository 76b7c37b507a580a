//! ContentLoader trait — the abstraction over external content sources.
//!
//! Loaders are what let a message reference content that lives elsewhere:
//! wiki pages, web pages, video transcripts. Each loader answers "is this
//! locator mine?" and, if so, fetches and normalizes the content.

use async_trait::async_trait;

use crate::document::LoadedDocument;
use crate::error::LoaderError;
use crate::options::LoaderOptions;

/// The core ContentLoader trait.
///
/// Each loader (wiki, web, youtube, ...) implements this trait. Loaders are
/// registered in the [`LoaderRegistry`] and consulted in order when a
/// placeholder locator needs resolving.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// The unique name of this loader (e.g., "wiki", "web").
    fn name(&self) -> &str;

    /// Whether this loader recognizes the locator.
    ///
    /// Must be cheap and side-effect free; it is called for every
    /// placeholder in every message.
    fn is_target(&self, locator: &str) -> bool;

    /// Fetch and normalize the content behind the locator.
    async fn load(
        &self,
        locator: &str,
        options: &LoaderOptions,
    ) -> std::result::Result<LoadedDocument, LoaderError>;
}

/// An ordered list of content loaders.
///
/// Registration order is a designed invariant, not an accident: `is_target`
/// predicates overlap (every wiki page URL is also a valid web URL), and
/// the first matching loader wins. Adding a loader means placing it
/// explicitly relative to the loaders it overlaps with.
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn ContentLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Append a loader. It is consulted after every loader already present.
    pub fn register(&mut self, loader: Box<dyn ContentLoader>) {
        self.loaders.push(loader);
    }

    /// Resolve a locator to the first loader that claims it.
    pub fn resolve(&self, locator: &str) -> Option<&dyn ContentLoader> {
        self.loaders
            .iter()
            .map(|l| l.as_ref())
            .find(|l| l.is_target(locator))
    }

    /// Registered loader names, in consultation order.
    pub fn names(&self) -> Vec<&str> {
        self.loaders.iter().map(|l| l.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
