//! Placeholder option values.
//!
//! Options arrive as `key=value` pairs inside a placeholder
//! (`{locator|title=Report;pages=1,3-5}`). Keys are loader-specific;
//! unrecognized keys are preserved but ignored. Duplicate keys: last
//! occurrence wins.

use std::collections::BTreeMap;

use crate::error::ExpandError;

/// Option key that overrides the auto-derived heading title.
pub const OPT_TITLE: &str = "title";

/// Option key that restricts rasterized PDF pages.
pub const OPT_PAGES: &str = "pages";

/// A parsed option map from a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    entries: BTreeMap<String, String>,
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option. A repeated key replaces the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The `title` option, if present.
    pub fn title(&self) -> Option<&str> {
        self.get(OPT_TITLE)
    }

    /// The parsed `pages` option, if present.
    ///
    /// Parsing is deferred to the point of use so that a `pages` value on
    /// content it does not apply to is simply ignored.
    pub fn pages(&self) -> Option<Result<PageSet, ExpandError>> {
        self.get(OPT_PAGES).map(PageSet::parse)
    }
}

impl FromIterator<(String, String)> for LoaderOptions {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A deduplicated, ascending set of **1-based** page numbers.
///
/// Parsed from a comma-separated list of single pages (`3`) or inclusive
/// ranges (`3-5`). `pages=1` selects the first page of the document; any
/// derived page number below 1 is rejected.
///
/// Stored as sorted, disjoint inclusive intervals rather than individual
/// page numbers: out-of-range pages are skipped at render time, so a wide
/// selector like `1-1000000` is valid input and must stay cheap to hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    ranges: Vec<(u32, u32)>,
}

impl PageSet {
    /// Parse a page selector such as `1,3-5,9`.
    ///
    /// Non-numeric bounds are a placeholder syntax error (the caller may
    /// degrade to literal text); a page number below 1 is an invalid
    /// selector and must not be silently repaired.
    pub fn parse(selector: &str) -> Result<Self, ExpandError> {
        let mut ranges = Vec::new();
        for part in selector.split(',') {
            let part = part.trim();
            let (start, end) = match part.split_once('-') {
                Some((start, end)) => (
                    parse_bound(selector, start)?,
                    parse_bound(selector, end)?,
                ),
                None => {
                    let page = parse_bound(selector, part)?;
                    (page, page)
                }
            };
            // An inverted range selects nothing, so it derives no pages
            // and cannot trip the 1-based check.
            if start > end {
                continue;
            }
            if start == 0 {
                return Err(ExpandError::InvalidPageSelector {
                    selector: selector.to_string(),
                    reason: "page numbers are 1-based".into(),
                });
            }
            ranges.push((start, end));
        }
        Ok(Self::from_ranges(ranges))
    }

    /// Normalize intervals: sort, then merge overlapping and adjacent runs.
    fn from_ranges(mut ranges: Vec<(u32, u32)>) -> Self {
        ranges.sort_unstable();
        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            match merged.last_mut() {
                Some((_, prior_end)) if start <= prior_end.saturating_add(1) => {
                    *prior_end = (*prior_end).max(end);
                }
                _ => merged.push((start, end)),
            }
        }
        Self { ranges: merged }
    }

    pub fn contains(&self, page: u32) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| (start..=end).contains(&page))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.ranges
            .iter()
            .map(|&(start, end)| (end - start) as usize + 1)
            .sum()
    }

    /// Iterate the selected pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|&(start, end)| start..=end)
    }
}

fn parse_bound(selector: &str, bound: &str) -> Result<u32, ExpandError> {
    bound
        .trim()
        .parse::<u32>()
        .map_err(|_| ExpandError::PlaceholderSyntax {
            raw: selector.to_string(),
            reason: format!("non-numeric page bound `{bound}`"),
        })
}
