//! The sample queue: a randomized backlog of documents to process.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Ordered, randomized, mutable backlog of document paths.
///
/// Paths are shuffled exactly once at construction and consumed from the
/// front. Callers should check [`remaining`](Self::remaining) before
/// popping and treat an empty queue as nothing-to-do rather than an
/// error.
#[derive(Debug, Default)]
pub struct SampleQueue {
    paths: VecDeque<PathBuf>,
}

impl SampleQueue {
    /// Build a queue from an explicit path list, shuffled with entropy
    /// from the OS.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self::with_rng(paths, &mut rand::thread_rng())
    }

    /// Build a queue with a caller-supplied seed. Used by tests and by
    /// anyone who wants a reproducible processing order.
    pub fn with_seed(paths: Vec<PathBuf>, seed: u64) -> Self {
        Self::with_rng(paths, &mut StdRng::seed_from_u64(seed))
    }

    fn with_rng<R: rand::Rng>(mut paths: Vec<PathBuf>, rng: &mut R) -> Self {
        paths.shuffle(rng);
        Self {
            paths: paths.into(),
        }
    }

    /// Enumerate the direct (non-recursive) file entries of a directory
    /// and build a shuffled queue from them.
    pub fn from_directory(directory: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                paths.push(entry.path());
            }
        }
        log::info!(
            "Imported sample of {} documents from {}",
            paths.len(),
            directory.display()
        );
        Ok(Self::new(paths))
    }

    /// Remove and return the front document path.
    pub fn pop_next(&mut self) -> Result<PathBuf> {
        self.paths.pop_front().ok_or(Error::EmptyQueue)
    }

    /// Number of documents left in the backlog.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }

    /// Whether the backlog is exhausted.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
