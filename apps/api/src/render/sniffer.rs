//! Format Sniffer: decides whether a `cvHtml` payload is already HTML,
//! JSON (possibly quoted and backslash-escaped by the backend), or plain text,
//! and routes it accordingly.
//!
//! Ordered rules, first match wins:
//! 1. empty / whitespace-only → "No Resume Content Available" page
//! 2. `<!DOCTYPE html>`, `<html>` or a closing tag → passed through untouched
//! 3. `{...}` or contains `\"` → decoded as JSON and rendered
//! 4. anything else → escaped inside `<pre>`

use serde_json::Value;
use tracing::{debug, warn};

use crate::render::html::{no_content_document, parse_error_document, plain_text_document};
use crate::render::template::generate_resume_html;

/// How many nested JSON string layers are unwrapped before giving up.
const MAX_DECODE_DEPTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Empty,
    Html,
    JsonLike,
    PlainText,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Empty => "empty",
            ContentFormat::Html => "html",
            ContentFormat::JsonLike => "json",
            ContentFormat::PlainText => "plain_text",
        }
    }
}

pub fn classify(raw: &str) -> ContentFormat {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        ContentFormat::Empty
    } else if looks_like_html(raw) {
        ContentFormat::Html
    } else if looks_like_json(trimmed) {
        ContentFormat::JsonLike
    } else {
        ContentFormat::PlainText
    }
}

fn looks_like_html(raw: &str) -> bool {
    raw.contains("<!DOCTYPE html>")
        || raw.contains("<html>")
        || (raw.contains('<') && raw.contains("</"))
}

fn looks_like_json(trimmed: &str) -> bool {
    (trimmed.starts_with('{') && trimmed.ends_with('}')) || trimmed.contains("\\\"")
}

/// Turns any `cvHtml` payload into a displayable HTML document. Cannot fail.
pub fn normalize_cv_content(raw: &str) -> String {
    normalize_at_depth(raw, 0)
}

fn normalize_at_depth(raw: &str, depth: u8) -> String {
    let format = classify(raw);
    debug!(
        format = format.as_str(),
        len = raw.len(),
        depth,
        "Classified CV content"
    );

    match format {
        ContentFormat::Empty => no_content_document(),
        ContentFormat::Html => raw.to_string(),
        ContentFormat::JsonLike => match decode_json_like(raw) {
            Ok(Value::String(inner)) if depth < MAX_DECODE_DEPTH => {
                debug!("CV content was a JSON-encoded string; decoding inner layer");
                normalize_at_depth(&inner, depth + 1)
            }
            Ok(value) => generate_resume_html(&value),
            Err(e) => {
                warn!("CV content looked like JSON but failed to parse: {e}");
                parse_error_document(raw, &e.to_string())
            }
        },
        ContentFormat::PlainText => plain_text_document(raw),
    }
}

/// Strips one layer of wrapping quotes, unescapes `\"` then `\\`, and parses.
fn decode_json_like(raw: &str) -> Result<Value, serde_json::Error> {
    let unquoted = strip_wrapping_quotes(raw.trim());
    let unescaped = unquoted.replace("\\\"", "\"").replace("\\\\", "\\");
    serde_json::from_str(&unescaped)
}

fn strip_wrapping_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
}
