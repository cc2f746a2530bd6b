//! HTML escaping and the fixed substitute documents the pipeline falls back to.

/// Number of characters of the offending input shown on the parse-error page.
pub const PARSE_ERROR_EXCERPT_CHARS: usize = 200;

const FALLBACK_STYLE: &str = r#"
    body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; padding: 40px; color: #333; background: #fafafa; }
    .notice { max-width: 720px; margin: 0 auto; background: #fff; border: 1px solid #e0e0e0; border-radius: 8px; padding: 32px; }
    .notice h1 { margin-top: 0; font-size: 22px; }
    .notice.error h1 { color: #c62828; }
    .notice p { line-height: 1.5; }
    pre { white-space: pre-wrap; word-wrap: break-word; background: #f5f5f5; padding: 16px; border-radius: 4px; font-size: 13px; }
"#;

/// Escape HTML special characters for text and double-quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a body fragment in a complete HTML document.
/// `title` is escaped; `style` and `body` are inserted as-is.
pub fn document(title: &str, style: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{style}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn notice(title: &str, class: &str, inner: &str) -> String {
    document(
        title,
        FALLBACK_STYLE,
        &format!(
            r#"<div class="notice {class}">
  <h1>{heading}</h1>
  {inner}
</div>"#,
            heading = escape_html(title),
        ),
    )
}

pub fn no_content_document() -> String {
    notice(
        "No Resume Content Available",
        "empty",
        "<p>This student has not generated a CV yet, or the CV content is empty.</p>",
    )
}

pub fn generation_error_document(message: &str) -> String {
    notice(
        "Resume Generation Error",
        "error",
        &format!(
            "<p>The resume could not be generated from the provided data.</p>\n  <pre>{}</pre>",
            escape_html(message)
        ),
    )
}

/// Diagnostic page for content that looked like JSON but did not parse.
pub fn parse_error_document(raw: &str, reason: &str) -> String {
    let excerpt: String = raw.chars().take(PARSE_ERROR_EXCERPT_CHARS).collect();
    let ellipsis = if raw.chars().count() > PARSE_ERROR_EXCERPT_CHARS {
        "..."
    } else {
        ""
    };
    notice(
        "Error Parsing Resume Data",
        "error",
        &format!(
            "<p>The CV content appears to be JSON but could not be parsed: {}</p>\n  <pre>{}{}</pre>",
            escape_html(reason),
            escape_html(&excerpt),
            ellipsis
        ),
    )
}

pub fn plain_text_document(raw: &str) -> String {
    document(
        "Resume",
        FALLBACK_STYLE,
        &format!("<pre>{}</pre>", escape_html(raw)),
    )
}
