//! # benkpress
//!
//! Build labeled datasets from PDF documents and interactively refit a
//! text classification pipeline against them.
//!
//! The crate is the headless core of a supervised-labeling tool: given a
//! folder of PDFs, a reader strategy, a page filter and a scoring
//! pipeline, a [`Session`] extracts per-page text, keeps the relevant
//! pages, segments them into units of the configured granularity (file,
//! page or sentence), scores each unit, and appends the results to an
//! editable, persistable [`Dataset`]. The dataset can then be
//! cross-validated and used to refit the pipeline.
//!
//! GUI toolkits, PDF viewers and concrete classifier plug-ins are
//! external collaborators: they reach the core through the
//! [`DocumentReader`], [`PageFilter`], [`Pipeline`] and
//! [`Sentencizer`] traits and observe table changes through
//! [`DatasetObserver`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use benkpress::{Session, SessionConfig};
//! use std::path::Path;
//!
//! # fn main() -> benkpress::Result<()> {
//! let mut session = Session::with_defaults(SessionConfig::default())?;
//! session.import_sample(Path::new("sample/"))?;
//!
//! while let Some(document) = session.next_document()? {
//!     println!("processed {}", document.display());
//! }
//!
//! let report = session.refit();
//! println!("{}", report);
//! session.save_dataset(Path::new("dataset.csv"))?;
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod error;
pub mod filter;
pub mod hash;
pub mod pipeline;
pub mod reader;
pub mod sample;
pub mod segment;
pub mod session;

pub use dataset::{Column, Dataset, DatasetObserver, DatasetRow, SaveState};
pub use error::{Error, Result};
pub use filter::{PageFilter, PassthroughFilter, PipelineFilter};
pub use hash::filename_digest;
pub use pipeline::{run_refit, BaselinePipeline, FoldReport, Pipeline, RefitReport};
pub use reader::{create_reader, DocumentReader, OcrConfig, OcrReader, ReaderConfig, ReaderKind, TextLayerReader};
pub use sample::SampleQueue;
pub use segment::{segment, RuleSentencizer, Sentencizer, Target, Unit};
pub use session::{Session, SessionConfig, SessionLog};
