// CV rendering pipeline.
// Format sniffer → template renderer → fixed fallback documents.
// Every public operation returns a complete HTML document; failures become content.

pub mod html;
pub mod sniffer;
pub mod template;

use thiserror::Error;

pub use sniffer::normalize_cv_content;

/// Internal renderer failure. Never crosses a public operation:
/// `generate_resume_html` converts it to the "Resume Generation Error" page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unexpected resume structure: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("jsonContent could not be decoded: {0}")]
    JsonContent(serde_json::Error),
}
