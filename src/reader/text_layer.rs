//! Embedded text layer extraction.

use crate::error::{Error, Result};
use crate::reader::{normalize_whitespace, DocumentReader};
use lopdf::Document;
use std::path::Path;

/// Reader that extracts the embedded text layer of a PDF.
///
/// Fast but imprecise: the text layer reflects whatever the producing
/// application wrote, which for scanned documents is often nothing.
#[derive(Debug, Default)]
pub struct TextLayerReader;

impl TextLayerReader {
    /// Create a new text-layer reader.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for TextLayerReader {
    fn read(&self, path: &Path) -> Result<Vec<String>> {
        let document = Document::load(path).map_err(|e| Error::Read {
            path: path.display().to_string(),
            reason: format!("not a parseable PDF: {}", e),
        })?;

        let mut pages = Vec::new();
        for (page_number, _) in document.get_pages() {
            let text = document
                .extract_text(&[page_number])
                .map_err(|e| Error::Read {
                    path: path.display().to_string(),
                    reason: format!("text extraction failed on page {}: {}", page_number, e),
                })?;
            pages.push(normalize_whitespace(&text));
        }

        log::debug!(
            "Extracted text layer of {} ({} pages)",
            path.display(),
            pages.len()
        );
        Ok(pages)
    }

    fn name(&self) -> &'static str {
        "textlayer"
    }
}
