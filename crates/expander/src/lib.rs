//! # docweave Expander
//!
//! The message expansion engine: scans a raw user message for embedded
//! reference placeholders, resolves each through the loader registry or the
//! local filesystem, and reassembles the result into an ordered multi-part
//! message of text and image blocks.
//!
//! Pipeline: raw string → [`segment`] → per-placeholder
//! [`placeholder::parse_placeholder`] → registry lookup or local-file
//! handling → [`assemble::Assembler`] → [`docweave_core::ExpandedMessage`].

pub mod assemble;
pub mod engine;
pub mod pdf;
pub mod placeholder;
pub mod segment;

pub use assemble::Assembler;
pub use engine::MessageExpander;
pub use placeholder::{Placeholder, parse_options, parse_placeholder};
pub use segment::{Delimiters, Segment, segment};
