//! The message expansion façade.
//!
//! [`MessageExpander`] is the one entry point collaborators use: raw message
//! in, expanded message out. Each call runs segmentation, placeholder
//! parsing, and assembly with a fresh builder — no state is carried between
//! calls.

use docweave_config::AppConfig;
use docweave_core::{ExpandedMessage, LoaderRegistry, Result};
use docweave_loaders::default_registry;

use crate::assemble::Assembler;
use crate::segment::{Delimiters, segment};

pub struct MessageExpander {
    registry: LoaderRegistry,
    delimiters: Delimiters,
}

impl MessageExpander {
    /// Create an expander over an explicit loader registry, with the
    /// default `{`/`}` delimiters.
    pub fn new(registry: LoaderRegistry) -> Self {
        Self {
            registry,
            delimiters: Delimiters::default(),
        }
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Create an expander with the default loader set from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(default_registry(config)?).with_delimiters(Delimiters::new(
            config.expander.open_delim,
            config.expander.close_delim,
        )))
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Expand every placeholder in the message.
    ///
    /// Content blocks appear in the same left-to-right order as their
    /// source segments; resolution is sequential, so the ordering guarantee
    /// holds by construction.
    pub async fn expand(&self, message: &str) -> Result<ExpandedMessage> {
        let segments = segment(message, &self.delimiters);
        tracing::debug!(segments = segments.len(), "expanding message");
        let expanded = Assembler::new(&self.registry, &self.delimiters)
            .assemble(segments)
            .await?;
        tracing::debug!(blocks = expanded.len(), "message expanded");
        Ok(expanded)
    }
}
