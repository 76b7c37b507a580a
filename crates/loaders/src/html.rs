//! Minimal HTML-to-text reduction shared by the network loaders.
//!
//! Fetched pages and wiki storage bodies are HTML; the model wants text.
//! This is deliberately small: drop script/style subtrees, turn block-level
//! tags into line breaks, strip the rest, decode the common entities.

/// Extract the contents of the `<title>` element, if present and non-empty.
pub fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open_start = lower.find("<title")?;
    let open_end = open_start + lower[open_start..].find('>')? + 1;
    let close = open_end + lower[open_end..].find("</title>")?;
    let title = decode_entities(html[open_end..close].trim());
    (!title.is_empty()).then_some(title)
}

/// Reduce an HTML document or fragment to plain text.
pub fn html_to_text(html: &str) -> String {
    let stripped = strip_element(html, "script");
    let stripped = strip_element(&stripped, "style");

    let mut text = String::with_capacity(stripped.len());
    let mut rest = stripped.as_str();
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            // Unterminated tag: keep the tail as-is.
            text.push_str(&rest[open..]);
            rest = "";
            break;
        };
        if is_line_break_tag(&rest[open + 1..open + close]) {
            text.push('\n');
        }
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);

    collapse_blank_runs(&decode_entities(&text))
}

/// Remove `<name …>…</name>` subtrees, case-insensitively.
fn strip_element(html: &str, name: &str) -> String {
    let open_marker = format!("<{name}");
    let close_marker = format!("</{name}>");
    let lower = html.to_ascii_lowercase();

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    while let Some(rel) = lower[cursor..].find(&open_marker) {
        let start = cursor + rel;
        out.push_str(&html[cursor..start]);
        match lower[start..].find(&close_marker) {
            Some(rel_close) => cursor = start + rel_close + close_marker.len(),
            None => {
                // Unclosed element: drop everything after the opening tag.
                cursor = html.len();
                break;
            }
        }
    }
    out.push_str(&html[cursor..]);
    out
}

/// Tags whose presence implies a line break in the text rendering.
fn is_line_break_tag(tag_body: &str) -> bool {
    let name = tag_body
        .trim_start_matches('/')
        .split(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    matches!(
        name.as_str(),
        "p" | "br" | "div" | "li" | "tr" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Collapse runs of blank lines down to one empty line and trim the ends.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line.trim_start());
        out.push('\n');
    }
    out.trim().to_string()
}
