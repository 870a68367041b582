use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// The document could not be opened or read at all. Fatal for the
    /// whole pipeline call; never recovered per page.
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("failed to render page: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF document readers.
///
/// Implementors provide the low-level page access; the extraction walk
/// (native text with OCR fallback) and the question parser live in
/// `pdfquiz-parsing`.
pub trait PdfBackend: Send + Sync {
    /// Open a document for reading. The returned handle owns the underlying
    /// document resources and releases them on drop.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// An open PDF document: a sequence of pages, each capable of yielding
/// embedded text and, independently, a rendered raster image.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Text from the page's embedded text layer. An empty string is a
    /// legal result (scanned page) and is not an error.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;

    /// Rasterize the page to a PNG for the OCR fallback.
    fn render_page_png(&self, index: usize) -> Result<Vec<u8>, BackendError>;
}
