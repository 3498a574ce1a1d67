// Document renderer: section plan → (HTML preview | paginated layout → PDF bytes).
// PDF generation is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod dates;
pub mod handlers;
pub mod paginator;
pub mod pdf;
pub mod preview;
pub mod sections;

use thiserror::Error;

use crate::layout::PageConfig;
use crate::models::resume::ResumeDocument;

pub use paginator::{paginate, LaidOutDocument};
pub use preview::render_preview_html;
pub use sections::plan_document;

const FILE_NAME_SUFFIX: &str = "_Resume.pdf";
const FALLBACK_FILE_STEM: &str = "Resume";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to encode page content: {0}")]
    Content(String),

    #[error("Failed to write PDF: {0}")]
    Write(String),
}

/// A finished export artifact.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub file_name: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

/// Turns a document snapshot into a finished PDF. The export pipeline holds one
/// behind `AppState::renderer`.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, doc: &ResumeDocument, config: &PageConfig) -> Result<RenderedPdf, RenderError>;
}

/// The lopdf-backed renderer used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfRenderer;

impl PdfRenderer for LopdfRenderer {
    fn render(&self, doc: &ResumeDocument, config: &PageConfig) -> Result<RenderedPdf, RenderError> {
        render_pdf(doc, config)
    }
}

/// Plans, paginates, and serializes a document snapshot to PDF.
pub fn render_pdf(doc: &ResumeDocument, config: &PageConfig) -> Result<RenderedPdf, RenderError> {
    let laid_out = layout_document(doc, config);
    let title = document_title(&doc.personal.full_name);
    let bytes = pdf::write_pdf(&laid_out, &title)?;
    Ok(RenderedPdf {
        file_name: export_file_name(&doc.personal.full_name),
        page_count: laid_out.page_count(),
        bytes,
    })
}

/// Plans and paginates without serializing.
pub fn layout_document(doc: &ResumeDocument, config: &PageConfig) -> LaidOutDocument {
    paginate(&plan_document(doc), config)
}

/// Renders the HTML preview of a snapshot.
pub fn preview_document(doc: &ResumeDocument) -> String {
    render_preview_html(&plan_document(doc))
}

/// `<last name token>_Resume.pdf`, or `Resume_Resume.pdf` when no usable name is set.
///
/// Characters that are unsafe in a file name or a `Content-Disposition` header
/// are dropped from the token.
pub fn export_file_name(full_name: &str) -> String {
    let stem: String = full_name
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '\''))
        .collect();
    let stem = stem.trim_matches('.');

    if stem.is_empty() {
        format!("{FALLBACK_FILE_STEM}{FILE_NAME_SUFFIX}")
    } else {
        format!("{stem}{FILE_NAME_SUFFIX}")
    }
}

fn document_title(full_name: &str) -> String {
    let name = full_name.trim();
    if name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} - Resume")
    }
}
