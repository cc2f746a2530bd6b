//! Viewer page: hosts a normalized CV inside a sandboxed iframe.
//!
//! The iframe gets `allow-same-origin allow-scripts` and nothing else (no
//! top navigation, popups or forms). A loading indicator stays up until the
//! iframe's `load` event fires once for the assigned `srcdoc`. A Source tab
//! shows the raw, unprocessed input.

use serde::Deserialize;

use crate::render::html::escape_html;
use crate::render::normalize_cv_content;
use crate::shell::export::{export_filename, ExportKind, PDF_UNAVAILABLE_MESSAGE};

pub const IFRAME_SANDBOX: &str = "allow-same-origin allow-scripts";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerTab {
    #[default]
    Preview,
    Source,
}

/// Optional owner name; enables the HTML download button when both parts are valid.
#[derive(Debug, Clone, Default)]
pub struct Owner<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

const VIEWER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>CV Viewer</title>
  <style>
    body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; background: #f0f2f5; }
    .toolbar { display: flex; gap: 8px; align-items: center; padding: 12px 16px; background: #fff; border-bottom: 1px solid #ddd; }
    .tab { border: none; background: none; padding: 8px 12px; cursor: pointer; font-size: 14px; border-bottom: 2px solid transparent; }
    .tab.active { border-bottom-color: #1a4b8c; color: #1a4b8c; font-weight: 600; }
    .spacer { flex: 1; }
    .action { padding: 6px 12px; font-size: 13px; cursor: pointer; }
    .pane { display: none; position: relative; padding: 16px; }
    .pane.active { display: block; }
    .loading { position: absolute; top: 32px; left: 0; right: 0; text-align: center; color: #666; }
    iframe { width: 100%; height: calc(100vh - 110px); border: 1px solid #ddd; background: #fff; }
    pre { white-space: pre-wrap; word-wrap: break-word; background: #fff; border: 1px solid #ddd; padding: 16px; font-size: 12px; }
  </style>
</head>
<body>
  <div class="toolbar">
    <button class="tab{{PREVIEW_ACTIVE}}" data-pane="preview-pane" onclick="showPane('preview-pane')">Preview</button>
    <button class="tab{{SOURCE_ACTIVE}}" data-pane="source-pane" onclick="showPane('source-pane')">Source</button>
    <span class="spacer"></span>
    <button class="action" id="download-html" onclick="downloadHtml()"{{DOWNLOAD_DISABLED}}>Download HTML</button>
    <button class="action" id="download-pdf" onclick="downloadPdf()">Download PDF</button>
  </div>
  <div id="preview-pane" class="pane{{PREVIEW_ACTIVE}}">
    <div id="cv-loading" class="loading">Loading CV...</div>
    <iframe id="cv-frame" title="CV Preview" sandbox="{{SANDBOX}}" srcdoc="{{SRCDOC}}" onload="document.getElementById('cv-loading').style.display='none'"></iframe>
  </div>
  <div id="source-pane" class="pane{{SOURCE_ACTIVE}}">
    <pre>{{SOURCE}}</pre>
  </div>
  <script>
    var CV_FILENAME = {{FILENAME_JSON}};
    var PDF_MESSAGE = {{PDF_MESSAGE_JSON}};
    function showPane(id) {
      document.querySelectorAll('.pane').forEach(function (p) { p.classList.toggle('active', p.id === id); });
      document.querySelectorAll('.tab').forEach(function (t) { t.classList.toggle('active', t.dataset.pane === id); });
    }
    function downloadHtml() {
      if (!CV_FILENAME) { return; }
      var blob = new Blob([document.getElementById('cv-frame').srcdoc], { type: 'text/html' });
      var link = document.createElement('a');
      link.href = URL.createObjectURL(blob);
      link.download = CV_FILENAME;
      document.body.appendChild(link);
      link.click();
      document.body.removeChild(link);
      URL.revokeObjectURL(link.href);
    }
    function downloadPdf() { alert(PDF_MESSAGE); }
  </script>
</body>
</html>"#;

/// Renders the host page for `raw` CV content.
pub fn render_viewer_page(raw: &str, tab: ViewerTab, owner: &Owner<'_>) -> String {
    let document = normalize_cv_content(raw);

    let filename = match (owner.first_name, owner.last_name) {
        (Some(first), Some(last)) => export_filename(first, last, ExportKind::Html).ok(),
        _ => None,
    };

    let (preview_active, source_active) = match tab {
        ViewerTab::Preview => (" active", ""),
        ViewerTab::Source => ("", " active"),
    };

    let page = VIEWER_TEMPLATE
        .replace("{{PREVIEW_ACTIVE}}", preview_active)
        .replace("{{SOURCE_ACTIVE}}", source_active)
        .replace(
            "{{DOWNLOAD_DISABLED}}",
            if filename.is_some() { "" } else { " disabled" },
        )
        .replace("{{SANDBOX}}", IFRAME_SANDBOX)
        .replace("{{FILENAME_JSON}}", &js_string_literal(filename.as_deref()))
        .replace(
            "{{PDF_MESSAGE_JSON}}",
            &js_string_literal(Some(PDF_UNAVAILABLE_MESSAGE)),
        );

    let srcdoc = escape_html(&document);
    let source = escape_html(raw);
    fill_slots(
        &page,
        &[("{{SRCDOC}}", srcdoc.as_str()), ("{{SOURCE}}", source.as_str())],
    )
}

/// Substitutes each marker once, in template order, without rescanning inserted
/// values. CV content may itself contain marker text.
fn fill_slots(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    for (marker, value) in slots {
        if let Some((before, after)) = rest.split_once(marker) {
            out.push_str(before);
            out.push_str(value);
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

/// JSON-encodes a value for a `<script>` block; `</` is split so it cannot close the tag.
fn js_string_literal(value: Option<&str>) -> String {
    match value {
        Some(v) => serde_json::Value::String(v.to_string())
            .to_string()
            .replace("</", "<\\/"),
        None => "null".to_string(),
    }
}
