//! Copy a sample folder, skipping documents already in a dataset.
//!
//! Copies the direct (non-recursive) file entries of one folder to
//! another, except those whose filename digest already appears in the
//! given dataset's `file` column. Used to build a fresh backlog that
//! excludes everything labeled so far.
//!
//! Usage:
//!   filter_sample <src-folder> <dst-folder> <dataset.csv>

use benkpress::{filename_digest, Dataset};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    source: PathBuf,
    destination: PathBuf,
    dataset: PathBuf,
}

impl Args {
    fn parse() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        if args.len() != 4 {
            return None;
        }
        Some(Self {
            source: PathBuf::from(&args[1]),
            destination: PathBuf::from(&args[2]),
            dataset: PathBuf::from(&args[3]),
        })
    }
}

fn run(args: &Args) -> benkpress::Result<usize> {
    let dataset = Dataset::load(&args.dataset)?;
    let labeled: HashSet<&str> = dataset.rows().iter().map(|row| row.file.as_str()).collect();

    let mut copied = 0;
    for entry in std::fs::read_dir(&args.source)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if labeled.contains(filename_digest(&path).as_str()) {
            log::debug!("Skipping already-labeled {}", path.display());
            continue;
        }
        std::fs::copy(&path, args.destination.join(entry.file_name()))?;
        copied += 1;
    }
    Ok(copied)
}

fn main() -> ExitCode {
    env_logger::init();
    let Some(args) = Args::parse() else {
        eprintln!("Usage: filter_sample <src-folder> <dst-folder> <dataset.csv>");
        return ExitCode::FAILURE;
    };
    match run(&args) {
        Ok(copied) => {
            println!("Copied {} documents to {}", copied, args.destination.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("filter_sample: {}", error);
            ExitCode::FAILURE
        }
    }
}
