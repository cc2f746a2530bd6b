// Presentation shell: hosts pipeline output for human review.
// Viewer page (sandboxed iframe + source tab), file exports, and the HTTP handlers.

pub mod export;
pub mod handlers;
pub mod viewer;
