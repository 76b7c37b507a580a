//! Content blocks and the expanded message.
//!
//! These are the value objects the engine produces: an ordered sequence of
//! text and image blocks, collapsed to a bare string when no images are
//! present so plain-text consumers keep working unchanged.

use serde_json::{Value, json};

/// One atomic unit of an expanded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// A run of text.
    Text { text: String },

    /// A base64-encoded image.
    Image {
        /// Media type, e.g. `image/png` or `image/jpg`.
        media_type: String,
        /// Base64 payload (no data-URI prefix).
        data: String,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Image {
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }

    /// The canonical transport shape for an image block.
    pub fn data_uri(&self) -> Option<String> {
        match self {
            Self::Text { .. } => None,
            Self::Image { media_type, data } => Some(format!("data:{media_type};base64,{data}")),
        }
    }

    /// Model-facing JSON for this block.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Text { text } => json!({ "type": "text", "text": text }),
            Self::Image { .. } => json!({
                "type": "image_url",
                "image_url": { "url": self.data_uri() }
            }),
        }
    }
}

/// The complete result of expanding one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandedMessage {
    /// The single-text-block collapse: no images were produced, so the
    /// message degrades to a bare string.
    Text(String),

    /// A multi-part message of interleaved text and image blocks.
    Blocks(Vec<ContentBlock>),
}

impl ExpandedMessage {
    /// Model-facing JSON: a bare string, or an array of block objects.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Text(text) => json!(text),
            Self::Blocks(blocks) => Value::Array(blocks.iter().map(|b| b.to_payload()).collect()),
        }
    }

    /// Number of content blocks (1 for the collapsed form).
    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::Blocks(blocks) => blocks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Blocks(blocks) if blocks.is_empty())
    }
}

/// Accumulates content blocks in message order.
///
/// The builder is the sole owner of the growing sequence; coalescing happens
/// here, at append time, so the finished message can never contain two
/// adjacent text blocks.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    blocks: Vec<ContentBlock>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text, merging into the previous block with a newline when the
    /// previous block is also text.
    pub fn push_text(&mut self, text: &str) {
        if let Some(ContentBlock::Text { text: prior }) = self.blocks.last_mut() {
            prior.push('\n');
            prior.push_str(text);
        } else {
            self.blocks.push(ContentBlock::text(text));
        }
    }

    /// Append an image block.
    pub fn push_image(&mut self, media_type: impl Into<String>, data: impl Into<String>) {
        self.blocks.push(ContentBlock::image(media_type, data));
    }

    /// Finish the message, applying the single-text-block collapse rule.
    pub fn finish(mut self) -> ExpandedMessage {
        if self.blocks.len() == 1 && self.blocks[0].is_text() {
            match self.blocks.remove(0) {
                ContentBlock::Text { text } => ExpandedMessage::Text(text),
                ContentBlock::Image { .. } => unreachable!(),
            }
        } else {
            ExpandedMessage::Blocks(self.blocks)
        }
    }
}
