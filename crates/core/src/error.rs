//! Error types for the docweave domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Not every failure surfaces: placeholder syntax errors are recovered
//! locally by the assembler (the placeholder degrades to literal text),
//! while I/O failures on a recognized reference propagate to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all docweave operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Expansion errors ---
    #[error("Expansion error: {0}")]
    Expand(#[from] ExpandError),

    // --- Loader errors ---
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised while parsing and assembling a message.
///
/// `PlaceholderSyntax` is recoverable (the assembler falls back to literal
/// text); the remaining variants abort the expansion call.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("Malformed placeholder `{raw}`: {reason}")]
    PlaceholderSyntax { raw: String, reason: String },

    #[error("Invalid page selector `{selector}`: {reason}")]
    InvalidPageSelector { selector: String, reason: String },

    #[error("Failed to read {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    #[error("Failed to rasterize {path}: {reason}")]
    PdfRender { path: PathBuf, reason: String },
}

impl ExpandError {
    /// Whether the assembler may recover by emitting the placeholder as
    /// literal text instead of failing the whole call.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExpandError::PlaceholderSyntax { .. })
    }
}

/// Errors raised inside a matched content loader.
///
/// A matched loader means the user explicitly referenced that source, so
/// these are never swallowed by the assembler.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Loader not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid locator for {loader}: {locator} ({reason})")]
    InvalidLocator {
        loader: String,
        locator: String,
        reason: String,
    },

    #[error("Network error in {loader}: {reason}")]
    Network { loader: String, reason: String },

    #[error("API request failed in {loader}: {message} (status: {status_code})")]
    Api {
        loader: String,
        status_code: u16,
        message: String,
    },

    #[error("No content available from {loader} for {locator}")]
    EmptyDocument { loader: String, locator: String },
}
