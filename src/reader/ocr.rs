//! Rasterize-and-OCR extraction.
//!
//! Shells out to `pdftoppm` (poppler-utils) to render each page as an
//! image, then to `tesseract` to recognize the text. Markedly slower
//! than text-layer extraction but works on scanned documents.

use crate::error::{Error, Result};
use crate::reader::{normalize_whitespace, DocumentReader, OcrConfig};
use std::path::Path;
use std::process::Command;

/// Reader that renders pages at a configured DPI and runs OCR on them.
#[derive(Debug)]
pub struct OcrReader {
    config: OcrConfig,
}

impl OcrReader {
    /// Create an OCR reader, validating the toolchain up front.
    ///
    /// Fails with [`Error::Configuration`] if the DPI is zero or either
    /// configured executable cannot be run, so a session never holds a
    /// reader that is doomed to fail on its first document.
    pub fn new(config: OcrConfig) -> Result<Self> {
        if config.dpi == 0 {
            return Err(Error::Configuration(
                "OCR dpi must be a positive integer".to_string(),
            ));
        }
        Self::check_executable(&config.pdftoppm_path, "-v")?;
        Self::check_executable(&config.tesseract_path, "--version")?;
        Ok(Self { config })
    }

    fn check_executable(path: &str, probe_arg: &str) -> Result<()> {
        Command::new(path)
            .arg(probe_arg)
            .output()
            .map_err(|e| Error::Configuration(format!("cannot run '{}': {}", path, e)))?;
        Ok(())
    }

    /// Render every page of `path` as a PNG in `dir`, returning the image
    /// paths in page order.
    fn rasterize(&self, path: &Path, dir: &Path) -> Result<Vec<std::path::PathBuf>> {
        let prefix = dir.join("page");
        let output = Command::new(&self.config.pdftoppm_path)
            .arg("-png")
            .arg("-r")
            .arg(self.config.dpi.to_string())
            .arg(path)
            .arg(&prefix)
            .output()
            .map_err(|e| Error::Read {
                path: path.display().to_string(),
                reason: format!("failed to run pdftoppm: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Read {
                path: path.display().to_string(),
                reason: format!("pdftoppm failed: {}", stderr.trim()),
            });
        }

        // pdftoppm zero-pads page numbers, so a lexicographic sort of the
        // generated filenames yields page order.
        let mut images: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
            .collect();
        images.sort();

        if images.is_empty() {
            return Err(Error::Read {
                path: path.display().to_string(),
                reason: "pdftoppm produced no page images".to_string(),
            });
        }
        Ok(images)
    }

    /// Run OCR on a single rendered page image.
    fn recognize(&self, image: &Path, source: &Path, page_number: usize) -> Result<String> {
        let output = Command::new(&self.config.tesseract_path)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .output()
            .map_err(|e| Error::Read {
                path: source.display().to_string(),
                reason: format!("failed to run tesseract on page {}: {}", page_number, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Read {
                path: source.display().to_string(),
                reason: format!("tesseract failed on page {}: {}", page_number, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DocumentReader for OcrReader {
    fn read(&self, path: &Path) -> Result<Vec<String>> {
        let scratch = tempfile::tempdir()?;

        log::info!(
            "Starting OCR extraction of {} (dpi={}, lang={})",
            path.display(),
            self.config.dpi,
            self.config.language
        );

        let images = self.rasterize(path, scratch.path())?;
        let mut pages = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let text = self.recognize(image, path, i + 1)?;
            pages.push(normalize_whitespace(&text));
        }

        log::info!(
            "OCR extraction of {} complete ({} pages)",
            path.display(),
            pages.len()
        );
        Ok(pages)
    }

    fn name(&self) -> &'static str {
        "ocr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executables_fail_construction() {
        let config = OcrConfig {
            pdftoppm_path: "/nonexistent/pdftoppm".to_string(),
            ..OcrConfig::default()
        };
        let err = OcrReader::new(config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_zero_dpi_fails_construction() {
        let config = OcrConfig {
            dpi: 0,
            ..OcrConfig::default()
        };
        let err = OcrReader::new(config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
