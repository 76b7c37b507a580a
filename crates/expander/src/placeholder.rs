//! Placeholder micro-syntax.
//!
//! Grammar:
//!
//! ```text
//! placeholder := locator [ '|' option (';' option)* ]
//! option      := key '=' value
//! ```
//!
//! Locator, keys, and values are trimmed. Duplicate keys: last wins.
//! A pair without `=` is a syntax error; the caller decides whether to
//! degrade the whole placeholder to literal text.

use docweave_core::{ExpandError, LoaderOptions};

/// A parsed placeholder body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub locator: String,
    pub options: LoaderOptions,
}

/// Parse a stripped placeholder body into locator and options.
pub fn parse_placeholder(raw: &str) -> Result<Placeholder, ExpandError> {
    let (locator, options_part) = match raw.split_once('|') {
        Some((locator, options)) => (locator.trim(), Some(options)),
        None => (raw.trim(), None),
    };

    if locator.is_empty() {
        return Err(ExpandError::PlaceholderSyntax {
            raw: raw.to_string(),
            reason: "empty locator".into(),
        });
    }

    let options = match options_part {
        Some(part) => parse_options(part)?,
        None => LoaderOptions::new(),
    };

    Ok(Placeholder {
        locator: locator.to_string(),
        options,
    })
}

/// Parse a `key=value;key=value` option string.
pub fn parse_options(raw: &str) -> Result<LoaderOptions, ExpandError> {
    let mut options = LoaderOptions::new();
    for pair in raw.split(';') {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(ExpandError::PlaceholderSyntax {
                raw: raw.to_string(),
                reason: format!("option `{}` has no `=`", pair.trim()),
            });
        };
        options.insert(key.trim(), value.trim());
    }
    Ok(options)
}
