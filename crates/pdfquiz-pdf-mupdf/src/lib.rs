use std::path::Path;

use mupdf::{Colorspace, Document, ImageFormat, Matrix, TextPageFlags};

use pdfquiz_core::{BackendError, PdfBackend, PdfDocument};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
pub struct MupdfBackend {
    /// Rasterization scale for the OCR fallback. 1.0 is 72 DPI; the
    /// default of 4.0 (≈ 288 DPI) is enough for text recognition without
    /// producing huge page images.
    render_scale: f32,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self { render_scale: 4.0 }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rasterization scale used when rendering pages for OCR.
    pub fn with_render_scale(mut self, scale: f32) -> Self {
        self.render_scale = scale;
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::Open("invalid path encoding".into()))?;

        let document = Document::open(path_str).map_err(|e| BackendError::Open(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| BackendError::Open(e.to_string()))? as usize;

        Ok(Box::new(MupdfDocument {
            document,
            page_count,
            render_scale: self.render_scale,
        }))
    }
}

/// An open MuPDF document. Underlying resources are released on drop.
struct MupdfDocument {
    document: Document,
    page_count: usize,
    render_scale: f32,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page = self
            .document
            .load_page(index as i32)
            .map_err(|e| BackendError::Extraction(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::Extraction(e.to_string()))?;

        // Use block/line iteration to match PyMuPDF's get_text() behavior
        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }
        Ok(page_text)
    }

    fn render_page_png(&self, index: usize) -> Result<Vec<u8>, BackendError> {
        let page = self
            .document
            .load_page(index as i32)
            .map_err(|e| BackendError::Render(e.to_string()))?;

        let matrix = Matrix::new_scale(self.render_scale, self.render_scale);
        let pixmap = page
            .to_pixmap(&matrix, &Colorspace::device_rgb(), 0.0, false)
            .map_err(|e| BackendError::Render(e.to_string()))?;

        let mut png = Vec::new();
        pixmap
            .write_to(&mut png, ImageFormat::PNG)
            .map_err(|e| BackendError::Render(e.to_string()))?;
        Ok(png)
    }
}
