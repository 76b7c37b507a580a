//! Message segmentation.
//!
//! Splits a raw message into literal runs and placeholder tokens, preserving
//! order and byte spans. Segments partition the input exactly: concatenating
//! every segment's original text reproduces the message byte for byte.

use std::ops::Range;

/// The placeholder delimiter pair.
///
/// Non-greedy by construction: a token runs from an opening delimiter to the
/// *first* closing delimiter after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

impl Delimiters {
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Reconstruct the original token text from a stripped placeholder body.
    pub fn wrap(&self, raw: &str) -> String {
        format!("{}{}{}", self.open, raw, self.close)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new('{', '}')
    }
}

/// One segment of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text outside any placeholder.
    Literal(String),

    /// A placeholder token. `raw` is the token body with delimiters
    /// stripped; `span` is the byte range of the full token in the
    /// original message, delimiters included.
    Placeholder { raw: String, span: Range<usize> },
}

/// Split a message into ordered segments.
///
/// Pure function: no I/O, no state, re-callable. An unmatched opening
/// delimiter is literal text; an empty message yields no segments.
pub fn segment(message: &str, delimiters: &Delimiters) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(rel_open) = message[cursor..].find(delimiters.open) {
        let open = cursor + rel_open;
        let body_start = open + delimiters.open.len_utf8();
        let Some(rel_close) = message[body_start..].find(delimiters.close) else {
            break;
        };
        let close = body_start + rel_close;
        let end = close + delimiters.close.len_utf8();

        if open > cursor {
            segments.push(Segment::Literal(message[cursor..open].to_string()));
        }
        segments.push(Segment::Placeholder {
            raw: message[body_start..close].to_string(),
            span: open..end,
        });
        cursor = end;
    }

    if cursor < message.len() {
        segments.push(Segment::Literal(message[cursor..].to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reassemble a message from its segments (round-trip property).
    fn reassemble(segments: &[Segment], delimiters: &Delimiters) -> String {
        segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.clone(),
                Segment::Placeholder { raw, .. } => delimiters.wrap(raw),
            })
            .collect()
    }

    #[test]
    fn no_placeholders_yields_single_literal() {
        let delims = Delimiters::default();
        let segments = segment("just plain text", &delims);
        assert_eq!(segments, vec![Segment::Literal("just plain text".into())]);
    }

    #[test]
    fn empty_message_yields_no_segments() {
        assert!(segment("", &Delimiters::default()).is_empty());
    }

    #[test]
    fn placeholder_between_literals() {
        let delims = Delimiters::default();
        let segments = segment("see {report.pdf} now", &delims);
        assert_eq!(
            segments,
            vec![
                Segment::Literal("see ".into()),
                Segment::Placeholder {
                    raw: "report.pdf".into(),
                    span: 4..16,
                },
                Segment::Literal(" now".into()),
            ]
        );
    }

    #[test]
    fn adjacent_placeholders() {
        let delims = Delimiters::default();
        let segments = segment("{a}{b}", &delims);
        assert_eq!(segments.len(), 2);
        assert!(matches!(&segments[0], Segment::Placeholder { raw, .. } if raw == "a"));
        assert!(matches!(&segments[1], Segment::Placeholder { raw, .. } if raw == "b"));
    }

    #[test]
    fn unmatched_open_delimiter_is_literal() {
        let delims = Delimiters::default();
        let segments = segment("before {unclosed", &delims);
        assert_eq!(segments, vec![Segment::Literal("before {unclosed".into())]);
    }

    #[test]
    fn first_close_delimiter_terminates_token() {
        // Non-greedy: "{a{b}" is one token with body "a{b".
        let delims = Delimiters::default();
        let segments = segment("{a{b}c", &delims);
        assert_eq!(
            segments,
            vec![
                Segment::Placeholder {
                    raw: "a{b".into(),
                    span: 0..5,
                },
                Segment::Literal("c".into()),
            ]
        );
    }

    #[test]
    fn round_trip_reconstructs_original() {
        let delims = Delimiters::default();
        let cases = [
            "",
            "plain",
            "{a}",
            "x{a}y{b|k=v}z",
            "dangling { open",
            "} stray close {ok} {",
            "unicode 日本語 {パス.txt} done",
        ];
        for message in cases {
            let segments = segment(message, &delims);
            assert_eq!(reassemble(&segments, &delims), message, "case: {message}");
        }
    }

    #[test]
    fn custom_delimiters() {
        let delims = Delimiters::new('[', ']');
        let segments = segment("see [notes.txt] here", &delims);
        assert!(matches!(
            &segments[1],
            Segment::Placeholder { raw, .. } if raw == "notes.txt"
        ));
        assert_eq!(reassemble(&segments, &delims), "see [notes.txt] here");
    }

    #[test]
    fn spans_cover_full_tokens() {
        let delims = Delimiters::default();
        let message = "a {b} c {d|x=1} e";
        for seg in segment(message, &delims) {
            if let Segment::Placeholder { raw, span } = seg {
                assert_eq!(&message[span.clone()], delims.wrap(&raw));
            }
        }
    }
}
