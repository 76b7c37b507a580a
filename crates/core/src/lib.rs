//! # docweave Core
//!
//! Domain types, traits, and error definitions for the docweave message
//! expansion engine. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The loader capability is defined as a trait here; concrete loaders live
//! in `docweave-loaders`. This enables:
//! - Swapping loader sets via configuration
//! - Easy testing with stub loaders
//! - Clean dependency graph (all crates depend inward on core)

pub mod block;
pub mod document;
pub mod error;
pub mod loader;
pub mod options;

// Re-export key types at crate root for ergonomics
pub use block::{ContentBlock, ExpandedMessage, MessageBuilder};
pub use document::LoadedDocument;
pub use error::{Error, ExpandError, LoaderError, Result};
pub use loader::{ContentLoader, LoaderRegistry};
pub use options::{LoaderOptions, PageSet};
