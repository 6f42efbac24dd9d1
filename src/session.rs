//! Session orchestration: one configured run of reader + filter +
//! segmenter + scoring pipeline against a sample queue.
//!
//! Every operation here is synchronous and single-threaded; a call runs
//! to completion before control returns to the interactive shell. OCR
//! reading and refitting block for their duration by design.

use crate::dataset::{Dataset, DatasetRow};
use crate::error::Result;
use crate::filter::{PageFilter, PassthroughFilter};
use crate::hash::filename_digest;
use crate::pipeline::{run_refit, score_unit, BaselinePipeline, Pipeline, RefitReport};
use crate::reader::{create_reader, DocumentReader, ReaderConfig};
use crate::sample::SampleQueue;
use crate::segment::{segment, RuleSentencizer, Sentencizer, Target};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Validated session configuration.
///
/// Constructed atomically and immutable once a session is built; build a
/// new session to change any of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Granularity at which dataset rows are produced.
    pub target: Target,
    /// Reader strategy and its parameters.
    pub reader: ReaderConfig,
    /// Fold count for refit benchmarking.
    pub kfold_splits: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target: Target::Page,
            reader: ReaderConfig::text_layer(),
            kfold_splits: 5,
        }
    }
}

/// Session-scoped log buffer, flushed to a sidecar file at save time.
///
/// Owned by the session and passed by reference into the workflow; not
/// global logging state.
#[derive(Debug, Default)]
pub struct SessionLog {
    lines: Vec<String>,
}

impl SessionLog {
    /// Append one block of text to the buffer.
    pub fn append(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Whether anything has been logged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All buffered lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the whole buffer to `path`.
    pub fn flush_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.lines.join("\n"))?;
        Ok(())
    }
}

/// A configured tagging session.
pub struct Session {
    config: SessionConfig,
    reader: Box<dyn DocumentReader>,
    filter: Box<dyn PageFilter>,
    pipeline: Box<dyn Pipeline>,
    sentencizer: Box<dyn Sentencizer>,
    dataset: Dataset,
    sample: SampleQueue,
    log: SessionLog,
}

impl Session {
    /// Build a session from a validated configuration and its plug-ins.
    ///
    /// The reader is resolved through the registry here; any
    /// configuration error fails construction entirely, so no partially
    /// configured session escapes into use.
    pub fn new(
        config: SessionConfig,
        filter: Box<dyn PageFilter>,
        pipeline: Box<dyn Pipeline>,
        sentencizer: Box<dyn Sentencizer>,
    ) -> Result<Self> {
        let reader = create_reader(&config.reader)?;
        log::info!(
            "Session built: target={:?}, reader={}, kfold={}",
            config.target,
            reader.name(),
            config.kfold_splits
        );
        Ok(Self {
            config,
            reader,
            filter,
            pipeline,
            sentencizer,
            dataset: Dataset::new(),
            sample: SampleQueue::default(),
            log: SessionLog::default(),
        })
    }

    /// Build a session from explicit plug-in instances, bypassing the
    /// reader registry. For callers (and tests) that already hold a
    /// constructed reader.
    pub fn from_parts(
        config: SessionConfig,
        reader: Box<dyn DocumentReader>,
        filter: Box<dyn PageFilter>,
        pipeline: Box<dyn Pipeline>,
        sentencizer: Box<dyn Sentencizer>,
    ) -> Self {
        Self {
            config,
            reader,
            filter,
            pipeline,
            sentencizer,
            dataset: Dataset::new(),
            sample: SampleQueue::default(),
            log: SessionLog::default(),
        }
    }

    /// Build a session with the baseline plug-ins: retain every page,
    /// score with an unfitted [`BaselinePipeline`], split sentences with
    /// the rule-based sentencizer.
    pub fn with_defaults(config: SessionConfig) -> Result<Self> {
        Self::new(
            config,
            Box::new(PassthroughFilter),
            Box::new(BaselinePipeline::new()),
            Box::new(RuleSentencizer::new()),
        )
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Import a sample folder: direct file entries, shuffled once.
    pub fn import_sample(&mut self, directory: &Path) -> Result<()> {
        self.sample = SampleQueue::from_directory(directory)?;
        Ok(())
    }

    /// Replace the sample backlog with a prebuilt queue.
    pub fn set_sample(&mut self, sample: SampleQueue) {
        self.sample = sample;
    }

    /// Documents left in the backlog.
    pub fn remaining_documents(&self) -> usize {
        self.sample.remaining()
    }

    /// The session's dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Mutable access to the dataset, for label edits and observers.
    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut self.dataset
    }

    /// The session log buffer.
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Process the next document in the sample queue.
    ///
    /// Returns the path of the processed document so the caller can load
    /// it into a viewer, or `None` as a no-op when the queue is empty.
    /// A reader failure aborts the whole operation for that document
    /// with no rows appended; once text is extracted, the remaining
    /// steps are in-memory transforms and scoring failures degrade to
    /// the default score instead of aborting.
    pub fn next_document(&mut self) -> Result<Option<PathBuf>> {
        if self.sample.is_empty() {
            log::debug!("Sample queue empty, nothing to process");
            return Ok(None);
        }
        let path = self.sample.pop_next()?;
        let file_id = filename_digest(&path);

        let pages = self.reader.read(&path)?;

        let retained: Vec<(u32, String)> = pages
            .into_iter()
            .enumerate()
            .filter(|(_, text)| self.filter.accepts(text))
            .map(|(index, text)| (index as u32 + 1, text))
            .collect();

        let units = segment(self.config.target, &retained, self.sentencizer.as_ref());
        log::info!(
            "Processed {}: {} retained pages, {} units",
            path.display(),
            retained.len(),
            units.len()
        );

        for unit in units {
            let (confidence, label) = score_unit(self.pipeline.as_ref(), &unit.text);
            self.dataset.append(DatasetRow {
                file: file_id.clone(),
                unit_number: unit.number,
                text: unit.text,
                confidence,
                label,
            });
        }
        Ok(Some(path))
    }

    /// Cross-validate and refit the scoring pipeline on the dataset.
    ///
    /// The rendered benchmark report is appended to the session log so
    /// it can be persisted alongside the dataset.
    pub fn refit(&mut self) -> RefitReport {
        let texts = self.dataset.texts();
        let labels = self.dataset.labels();
        let report = run_refit(
            self.pipeline.as_mut(),
            &texts,
            &labels,
            self.config.kfold_splits,
            crate::pipeline::DEFAULT_REFIT_SEED,
        );
        self.log.append(report.to_string());
        report
    }

    /// Replace the dataset with a fresh, empty one.
    ///
    /// Observers bound to the previous dataset are carried over and get
    /// a single `reset` notification.
    pub fn new_dataset(&mut self) {
        let mut fresh = Dataset::new();
        fresh.adopt_observers(&mut self.dataset);
        self.dataset = fresh;
        self.dataset.notify_reset();
    }

    /// Replace the dataset wholesale from a saved file.
    ///
    /// Observers bound to the previous dataset are carried over and get
    /// a single `reset` notification. On a load failure the current
    /// dataset, observers included, is left untouched.
    pub fn load_dataset(&mut self, path: &Path) -> Result<()> {
        let mut loaded = Dataset::load(path)?;
        loaded.adopt_observers(&mut self.dataset);
        self.dataset = loaded;
        self.dataset.notify_reset();
        Ok(())
    }

    /// Persist the dataset and flush the session log to a sidecar file.
    ///
    /// The sidecar lives next to the dataset as `<path>.log` and holds
    /// the accumulated benchmark reports.
    pub fn save_dataset(&mut self, path: &Path) -> Result<()> {
        self.dataset.save(path)?;
        if !self.log.is_empty() {
            let mut sidecar = path.as_os_str().to_owned();
            sidecar.push(".log");
            self.log.flush_to(Path::new(&sidecar))?;
        }
        Ok(())
    }
}
