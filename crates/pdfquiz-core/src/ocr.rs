use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    /// The recognition engine is not installed or not runnable.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
    #[error("OCR engine failed: {0}")]
    Engine(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for optical text recognition over a rendered page image.
///
/// The engine itself is an external collaborator (e.g. a tesseract
/// process); implementors are thin adapters. A failure here is recovered
/// per page by the extraction walk — it never aborts a document.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a PNG-encoded page image.
    fn recognize(&self, png_bytes: &[u8]) -> Result<String, OcrError>;
}
