//! The append-only, editable, persistable dataset table.
//!
//! The table owns no UI dependency: GUI bindings observe changes through
//! [`DatasetObserver`] and render however they like.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One persisted dataset record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    /// Stable identifier of the source document (filename digest).
    pub file: String,
    /// Unit number: 0 for file units, the 1-indexed page number otherwise.
    pub unit_number: u32,
    /// The unit text.
    pub text: String,
    /// Predicted probability of the positive class, in [0, 1].
    pub confidence: f64,
    /// Integer class label; the only user-editable cell.
    pub label: i64,
}

/// Columns of the dataset table, in persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Stable file identifier.
    File,
    /// Unit number.
    UnitNumber,
    /// Unit text.
    Text,
    /// Positive-class confidence.
    Confidence,
    /// Class label.
    Label,
}

/// Whether the table has unpersisted changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// No changes since the last save, load or creation.
    Saved,
    /// At least one append or edit since the last save.
    Unsaved,
}

/// Observer interface for views bound to the dataset.
///
/// A fresh or loaded dataset replaces the table wholesale, so observers
/// get `reset` rather than per-row notifications in that case.
pub trait DatasetObserver {
    /// A row was appended at `index`.
    fn row_appended(&mut self, index: usize);

    /// The label cell of row `index` changed.
    fn cell_edited(&mut self, index: usize, column: Column);

    /// The table content was replaced wholesale.
    fn reset(&mut self);
}

/// Append-only table of dataset rows with label-edit support.
#[derive(Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    state: SaveState,
    observers: Vec<Box<dyn DatasetObserver>>,
}

impl Default for SaveState {
    fn default() -> Self {
        Self::Saved
    }
}

impl Dataset {
    /// Create an empty dataset. A fresh dataset is never dirty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dataset wholesale from a previously saved file.
    ///
    /// The loaded dataset starts in the `Saved` state.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record?);
        }
        log::info!("Loaded dataset from {} ({} rows)", path.display(), rows.len());
        Ok(Self {
            rows,
            state: SaveState::Saved,
            observers: Vec::new(),
        })
    }

    /// Register an observer for change notifications.
    pub fn add_observer(&mut self, observer: Box<dyn DatasetObserver>) {
        self.observers.push(observer);
    }

    /// Move all observers off `other` onto this table.
    ///
    /// Used when one table replaces another wholesale, so views bound to
    /// the old table keep receiving notifications from its successor.
    pub fn adopt_observers(&mut self, other: &mut Dataset) {
        self.observers.append(&mut other.observers);
    }

    /// Append a row at the end and mark the dataset unsaved.
    pub fn append(&mut self, row: DatasetRow) {
        self.rows.push(row);
        self.state = SaveState::Unsaved;
        let index = self.rows.len() - 1;
        for observer in &mut self.observers {
            observer.row_appended(index);
        }
    }

    /// Edit a single cell.
    ///
    /// Only the label column is editable and the value must parse as an
    /// integer; any other request is rejected with a validation error
    /// and the table is left untouched, with no notification.
    pub fn edit(&mut self, index: usize, column: Column, value: &str) -> Result<()> {
        if column != Column::Label {
            return Err(Error::Validation(format!(
                "column {:?} is not editable",
                column
            )));
        }
        let row = self
            .rows
            .get_mut(index)
            .ok_or_else(|| Error::Validation(format!("row {} out of range", index)))?;
        let label: i64 = value
            .trim()
            .parse()
            .map_err(|_| Error::Validation(format!("'{}' is not an integer label", value)))?;

        row.label = label;
        self.state = SaveState::Unsaved;
        for observer in &mut self.observers {
            observer.cell_edited(index, column);
        }
        Ok(())
    }

    /// Serialize all rows to a CSV file and mark the dataset saved.
    ///
    /// Column order is stable: file, unit_number, text, confidence, label.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        // Automatic headers are disabled so the explicit header below is
        // the only one; an empty table still carries it.
        writer.write_record(["file", "unit_number", "text", "confidence", "label"])?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        self.state = SaveState::Saved;
        log::info!("Saved dataset to {} ({} rows)", path.display(), self.rows.len());
        Ok(())
    }

    /// Read-only view of all rows.
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Text column projection, used for refitting.
    pub fn texts(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.text.clone()).collect()
    }

    /// Label column projection, used for refitting.
    pub fn labels(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.label).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current save state.
    pub fn state(&self) -> SaveState {
        self.state
    }

    /// Notify observers that the table was replaced wholesale.
    ///
    /// Called by the session after swapping in a new or loaded dataset.
    pub fn notify_reset(&mut self) {
        for observer in &mut self.observers {
            observer.reset();
        }
    }
}
