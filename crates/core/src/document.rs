//! The normalized result of loading an external resource.

use serde::{Deserialize, Serialize};

/// A document fetched by a content loader.
///
/// Loaders normalize whatever they fetch (wiki storage format, HTML, a
/// transcript) into a plain-text body plus an optional title. The assembler
/// decides how the document is presented inside the expanded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedDocument {
    /// Title reported by the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The text content.
    pub body: String,
}

impl LoadedDocument {
    /// Create an untitled document.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    /// Create a titled document.
    pub fn with_title(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
        }
    }
}
