//! CV downloads: `{firstName}_{lastName}_CV.html` and `{firstName}_{lastName}_CV_data.json`.
//! PDF export is deliberately absent; callers get [`PDF_UNAVAILABLE_MESSAGE`].

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::errors::AppError;

pub const PDF_UNAVAILABLE_MESSAGE: &str = "PDF download requires server-side conversion. \
Please download the HTML version and print it to PDF from your browser.";

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Html,
    Json,
}

impl ExportKind {
    fn suffix(&self) -> &'static str {
        match self {
            ExportKind::Html => "_CV.html",
            ExportKind::Json => "_CV_data.json",
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            ExportKind::Html => HTML_CONTENT_TYPE,
            ExportKind::Json => JSON_CONTENT_TYPE,
        }
    }
}

/// A file attachment ready to be sent to the browser.
///
/// `filename` is the ASCII fallback; `unicode_filename` keeps accented names
/// and is sent as the RFC 6266 `filename*` parameter.
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub unicode_filename: String,
    pub content_type: &'static str,
    pub body: String,
}

impl Download {
    pub fn html(first_name: &str, last_name: &str, document: String) -> Result<Self, AppError> {
        Ok(Download {
            filename: export_filename(first_name, last_name, ExportKind::Html)?,
            unicode_filename: unicode_export_filename(first_name, last_name, ExportKind::Html)?,
            content_type: ExportKind::Html.content_type(),
            body: document,
        })
    }

    /// Pretty-prints the parsed résumé with two-space indentation.
    pub fn json(first_name: &str, last_name: &str, resume: &Value) -> Result<Self, AppError> {
        let body = serde_json::to_string_pretty(resume)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;
        Ok(Download {
            filename: export_filename(first_name, last_name, ExportKind::Json)?,
            unicode_filename: unicode_export_filename(first_name, last_name, ExportKind::Json)?,
            content_type: ExportKind::Json.content_type(),
            body,
        })
    }
}

impl IntoResponse for Download {
    fn into_response(self) -> Response {
        let disposition = format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            self.filename,
            urlencoding::encode(&self.unicode_filename)
        );
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Builds `{first}_{last}{suffix}` from sanitized name parts.
pub fn export_filename(
    first_name: &str,
    last_name: &str,
    kind: ExportKind,
) -> Result<String, AppError> {
    let first = sanitize_name_part(first_name, "firstName", |c| c.is_ascii_alphanumeric())?;
    let last = sanitize_name_part(last_name, "lastName", |c| c.is_ascii_alphanumeric())?;
    Ok(format!("{first}_{last}{}", kind.suffix()))
}

/// Same pattern as [`export_filename`], but letters and digits from any script are kept.
pub fn unicode_export_filename(
    first_name: &str,
    last_name: &str,
    kind: ExportKind,
) -> Result<String, AppError> {
    let first = sanitize_name_part(first_name, "firstName", char::is_alphanumeric)?;
    let last = sanitize_name_part(last_name, "lastName", char::is_alphanumeric)?;
    Ok(format!("{first}_{last}{}", kind.suffix()))
}

/// Keeps characters accepted by `keep`, plus `-` and `_`; everything else becomes `_`.
fn sanitize_name_part(
    part: &str,
    field: &str,
    keep: impl Fn(char) -> bool,
) -> Result<String, AppError> {
    let trimmed = part.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed
        .chars()
        .map(|c| {
            if keep(c) || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_html_filename() {
        let name = export_filename("Juan", "Dela Cruz", ExportKind::Html).unwrap();
        assert_eq!(name, "Juan_Dela_Cruz_CV.html");
    }

    #[test]
    fn test_json_filename() {
        let name = export_filename("Jane", "Doe", ExportKind::Json).unwrap();
        assert_eq!(name, "Jane_Doe_CV_data.json");
    }

    #[test]
    fn test_filename_sanitizes_unsafe_characters() {
        let name = export_filename("Jos\u{e9}", "O'Neil\"/..", ExportKind::Html).unwrap();
        assert_eq!(name, "Jos__O_Neil_____CV.html");
    }

    #[test]
    fn test_unicode_filename_keeps_accented_letters() {
        let name = unicode_export_filename("Jos\u{e9}", "Pe\u{f1}a", ExportKind::Html).unwrap();
        assert_eq!(name, "Jos\u{e9}_Pe\u{f1}a_CV.html");
    }

    #[test]
    fn test_disposition_carries_ascii_and_utf8_names() {
        let download = Download::html("Jos\u{e9}", "Pe\u{f1}a", String::new()).unwrap();
        let response = download.into_response();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jos__Pe_a_CV.html\"; filename*=UTF-8''Jos%C3%A9_Pe%C3%B1a_CV.html"
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = export_filename("  ", "Doe", ExportKind::Html).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("firstName")));
    }

    #[test]
    fn test_json_download_is_pretty_printed() {
        let download = Download::json("Jane", "Doe", &json!({ "skills": ["Rust"] })).unwrap();
        assert_eq!(download.body, "{\n  \"skills\": [\n    \"Rust\"\n  ]\n}");
        assert_eq!(download.content_type, "application/json");
    }
}
