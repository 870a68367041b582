use std::io::Write;
use std::process::Command;

use pdfquiz_core::{OcrEngine, OcrError};

/// [`OcrEngine`] adapter over an external `tesseract` process.
///
/// The recognition engine itself is an external collaborator; this crate
/// only shells out. Each call writes the page image to a scoped temp file,
/// runs `tesseract <img> stdout -l <lang>` and returns its stdout. The temp
/// file is removed when the handle drops, on every exit path.
pub struct TesseractOcr {
    language: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tesseract language code (default "eng").
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether a runnable `tesseract` binary is on PATH.
    pub fn available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, png_bytes: &[u8]) -> Result<String, OcrError> {
        let mut image = tempfile::Builder::new()
            .prefix("pdfquiz_page_")
            .suffix(".png")
            .tempfile()?;
        image.write_all(png_bytes)?;
        image.flush()?;

        let output = Command::new("tesseract")
            .arg(image.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OcrError::Unavailable("tesseract not found on PATH".into())
                } else {
                    OcrError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(status = %output.status, "tesseract exited with failure");
            return Err(OcrError::Engine(stderr.trim().to_string()));
        }

        // Tesseract terminates each page with a form feed; strip it.
        let text = String::from_utf8_lossy(&output.stdout).replace('\x0c', "");
        Ok(text)
    }
}
