//! Axum route handlers for the CV rendering API.

use axum::{
    extract::Query,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::render::normalize_cv_content;
use crate::shell::export::{Download, HTML_CONTENT_TYPE, PDF_UNAVAILABLE_MESSAGE};
use crate::shell::viewer::{render_viewer_page, Owner, ViewerTab, IFRAME_SANDBOX};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub cv_html: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerRequest {
    #[serde(default)]
    pub cv_html: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    #[serde(default)]
    pub tab: ViewerTab,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlDownloadRequest {
    #[serde(default)]
    pub cv_html: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDownloadRequest {
    pub resume: Value,
    pub first_name: String,
    pub last_name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/render
///
/// Returns the normalized CV document. The CSP header sandboxes it the same way
/// the viewer's iframe does when the document is opened directly.
pub async fn handle_render(Json(request): Json<RenderRequest>) -> impl IntoResponse {
    info!(len = request.cv_html.len(), "Rendering CV");

    let document = normalize_cv_content(&request.cv_html);
    (
        [
            (header::CONTENT_TYPE, HTML_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_SECURITY_POLICY,
                format!("sandbox {IFRAME_SANDBOX}"),
            ),
        ],
        document,
    )
}

/// POST /api/v1/cv/viewer?tab=preview|source
///
/// Host page with the sandboxed preview, the raw source tab and download actions.
pub async fn handle_viewer(
    Query(query): Query<ViewerQuery>,
    Json(request): Json<ViewerRequest>,
) -> Html<String> {
    info!(tab = ?query.tab, len = request.cv_html.len(), "Rendering CV viewer");

    let owner = Owner {
        first_name: request.first_name.as_deref(),
        last_name: request.last_name.as_deref(),
    };
    Html(render_viewer_page(&request.cv_html, query.tab, &owner))
}

/// POST /api/v1/cv/download/html
pub async fn handle_download_html(
    Json(request): Json<HtmlDownloadRequest>,
) -> Result<Download, AppError> {
    let document = normalize_cv_content(&request.cv_html);
    let download = Download::html(&request.first_name, &request.last_name, document)?;
    info!(filename = %download.filename, "Serving CV HTML download");
    Ok(download)
}

/// POST /api/v1/cv/download/json
///
/// Used when only parsed résumé data (no HTML) is available.
pub async fn handle_download_json(
    Json(request): Json<JsonDownloadRequest>,
) -> Result<Download, AppError> {
    let download = Download::json(&request.first_name, &request.last_name, &request.resume)?;
    info!(filename = %download.filename, "Serving CV data download");
    Ok(download)
}

/// POST /api/v1/cv/download/pdf
///
/// Not implemented: PDF conversion has to happen server-side and no converter is wired in.
pub async fn handle_download_pdf() -> Result<(), AppError> {
    Err(AppError::NotImplemented(PDF_UNAVAILABLE_MESSAGE.to_string()))
}
