//! Error types for the benkpress core.
//!
//! This module defines all error types that can occur while building a
//! session, processing documents into dataset rows, and refitting the
//! scoring pipeline.

/// Result type alias for benkpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during session and dataset processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Document could not be read (corrupt PDF, or OCR toolchain failure).
    ///
    /// Aborts processing of the current document; no partial rows are
    /// appended to the dataset.
    #[error("Failed to read '{path}': {reason}")]
    Read {
        /// Path of the document that failed.
        path: String,
        /// Reason for the read failure.
        reason: String,
    },

    /// `pop_next` was called on an empty sample queue.
    #[error("Sample queue is empty")]
    EmptyQueue,

    /// Scoring pipeline has never been fit.
    ///
    /// Recovered locally via the default-score fallback; never surfaced
    /// to the user.
    #[error("Scoring pipeline has not been fitted")]
    UnfittedPipeline,

    /// A manual cell edit was rejected.
    #[error("Invalid edit: {0}")]
    Validation(String),

    /// Invalid session configuration (unknown reader/target identifier,
    /// bad OCR parameters). Fails session construction entirely.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Cross-validation or final refit failure. Reported as a warning;
    /// never terminates the application.
    #[error("Refit failed: {0}")]
    Refit(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset serialization error
    #[error("Dataset format error: {0}")]
    Csv(#[from] csv::Error),
}
