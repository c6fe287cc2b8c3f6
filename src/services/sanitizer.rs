//! Normalizing model-written SVG into a standalone document.

use once_cell::sync::Lazy;
use regex::Regex;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

// The `<svg` opening tag, up to its closing `>`. Quoted attribute values may contain `>`.
static RE_SVG_OPEN_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<svg(?:\s(?:[^>"']|"[^"]*"|'[^']*')*)?/?>"#).expect("valid svg tag regex")
});

static RE_XMLNS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\sxmlns\s*=").expect("valid xmlns regex"));

/// Clean one slide's SVG text.
///
/// Returns an empty string for empty input. Otherwise the result starts with
/// the XML declaration and its root `<svg>` tag carries the SVG namespace.
pub fn sanitize_svg(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let unescaped = unescape_json_sequences(raw);
    let trimmed = unescaped.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut doc = if trimmed.starts_with("<?xml") {
        trimmed.to_string()
    } else {
        format!("{XML_DECLARATION}\n{trimmed}")
    };

    ensure_svg_namespace(&mut doc);
    doc
}

/// Undo leftover JSON string escaping (`\"`, `\n`, `\t`).
fn unescape_json_sequences(s: &str) -> String {
    s.replace("\\\"", "\"").replace("\\n", "\n").replace("\\t", "\t")
}

/// Set `xmlns` on the first `<svg>` opening tag when it has none.
fn ensure_svg_namespace(doc: &mut String) {
    let Some(tag) = RE_SVG_OPEN_TAG.find(doc) else {
        return;
    };
    if RE_XMLNS_ATTR.is_match(tag.as_str()) {
        return;
    }
    let insert_at = tag.start() + "<svg".len();
    doc.insert_str(insert_at, &format!(r#" xmlns="{SVG_NAMESPACE}""#));
}
