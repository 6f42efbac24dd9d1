//! Stable file identifiers for dataset rows.
//!
//! Rows reference documents by a digest of the filename component only,
//! not the full path and not the file bytes, so a sample folder can be
//! moved or renamed without orphaning previously labeled rows.

use md5::{Digest, Md5};
use std::path::Path;

/// Produce the stable identifier for a document path.
///
/// The digest covers only the final filename component, so two documents
/// with the same filename in different directories share an identifier,
/// and repeated calls for the same filename always agree.
pub fn filename_digest(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut hasher = Md5::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let a = filename_digest(Path::new("report.pdf"));
        let b = filename_digest(Path::new("report.pdf"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_ignores_directory() {
        let a = filename_digest(Path::new("/srv/sample/report.pdf"));
        let b = filename_digest(Path::new("C:/other/place/report.pdf"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_differs_per_filename() {
        let a = filename_digest(Path::new("report.pdf"));
        let b = filename_digest(Path::new("invoice.pdf"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let digest = filename_digest(Path::new("report.pdf"));
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!digest.chars().any(|c| c.is_ascii_uppercase()));
    }
}
