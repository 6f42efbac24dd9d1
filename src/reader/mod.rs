//! Document readers for turning a PDF file into per-page text.
//!
//! This module provides pluggable reader strategies, resolved through an
//! explicit registry at session-build time:
//!
//! - [`TextLayerReader`]: embedded text layer extraction. Fast but
//!   imprecise; mostly useful for digital-native PDFs and for testing.
//! - [`OcrReader`]: rasterizes each page and runs OCR on the images.
//!   Slow but precise; works on scanned documents. Callers must not
//!   assume bounded latency (seconds per page is normal).

mod ocr;
mod text_layer;

pub use ocr::OcrReader;
pub use text_layer::TextLayerReader;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Trait for reading a PDF document into per-page text.
///
/// Implementations return one string per PDF page, in page order, each
/// whitespace-normalized (runs of whitespace collapsed to single spaces).
/// A failure aborts processing of the current document; there is no
/// retry policy.
pub trait DocumentReader {
    /// Read a PDF file into a vector of per-page strings.
    fn read(&self, path: &Path) -> Result<Vec<String>>;

    /// Return the name of this reader for logging.
    fn name(&self) -> &'static str;
}

/// Reader strategy identifiers.
///
/// A closed enum so an unknown reader name is rejected when the session
/// configuration is parsed, not at first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReaderKind {
    /// Embedded text layer extraction.
    TextLayer,
    /// Rasterize-and-OCR extraction.
    Ocr,
}

impl FromStr for ReaderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "textlayer" | "text-layer" | "text" => Ok(Self::TextLayer),
            "ocr" | "tesseract" => Ok(Self::Ocr),
            other => Err(Error::Configuration(format!(
                "unknown reader '{}' (expected 'textlayer' or 'ocr')",
                other
            ))),
        }
    }
}

/// Parameters for the OCR reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Rasterization resolution. Must be positive.
    pub dpi: u32,
    /// OCR language model, e.g. "eng" or "swe".
    pub language: String,
    /// Path of the `pdftoppm` executable.
    pub pdftoppm_path: String,
    /// Path of the `tesseract` executable.
    pub tesseract_path: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            dpi: 100,
            language: "eng".to_string(),
            pdftoppm_path: "pdftoppm".to_string(),
            tesseract_path: "tesseract".to_string(),
        }
    }
}

/// Reader selection plus the parameters relevant to the chosen strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Which reader strategy to build.
    pub kind: ReaderKind,
    /// OCR parameters. Ignored by the text-layer reader.
    #[serde(default)]
    pub ocr: OcrConfig,
}

impl ReaderConfig {
    /// Configuration for the text-layer reader.
    pub fn text_layer() -> Self {
        Self {
            kind: ReaderKind::TextLayer,
            ocr: OcrConfig::default(),
        }
    }

    /// Configuration for the OCR reader.
    pub fn ocr(config: OcrConfig) -> Self {
        Self {
            kind: ReaderKind::Ocr,
            ocr: config,
        }
    }
}

/// Build a reader from its configuration.
///
/// Validates the configuration as a whole: a bad DPI or a missing OCR
/// executable fails here with [`Error::Configuration`], so no partially
/// usable reader escapes into a session.
pub fn create_reader(config: &ReaderConfig) -> Result<Box<dyn DocumentReader>> {
    match config.kind {
        ReaderKind::TextLayer => Ok(Box::new(TextLayerReader::new())),
        ReaderKind::Ocr => Ok(Box::new(OcrReader::new(config.ocr.clone())?)),
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Applied to every page by both reader strategies so downstream
/// filtering and segmentation see a uniform representation.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_kind_from_str() {
        assert_eq!("textlayer".parse::<ReaderKind>().unwrap(), ReaderKind::TextLayer);
        assert_eq!("OCR".parse::<ReaderKind>().unwrap(), ReaderKind::Ocr);
        assert_eq!("Tesseract".parse::<ReaderKind>().unwrap(), ReaderKind::Ocr);
    }

    #[test]
    fn test_unknown_reader_kind_is_configuration_error() {
        let err = "pypdf".parse::<ReaderKind>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_create_text_layer_reader() {
        let reader = create_reader(&ReaderConfig::text_layer()).unwrap();
        assert_eq!(reader.name(), "textlayer");
    }

    #[test]
    fn test_create_ocr_reader_rejects_zero_dpi() {
        let config = ReaderConfig::ocr(OcrConfig {
            dpi: 0,
            ..OcrConfig::default()
        });
        assert!(matches!(
            create_reader(&config),
            Err(Error::Configuration(_))
        ));
    }
}
