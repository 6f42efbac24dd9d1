//! Convert an old dataset's `file` column to stable identifiers.
//!
//! Older datasets recorded raw filenames (or full paths) in the `file`
//! column. This tool rewrites the column to filename digests so the
//! dataset keeps working after sample folders move.
//!
//! Usage:
//!   convert_dataset <src.csv> <dst.csv>

use benkpress::{filename_digest, Dataset};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

struct Args {
    source: PathBuf,
    destination: PathBuf,
}

impl Args {
    fn parse() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        if args.len() != 3 {
            return None;
        }
        Some(Self {
            source: PathBuf::from(&args[1]),
            destination: PathBuf::from(&args[2]),
        })
    }
}

fn run(args: &Args) -> benkpress::Result<usize> {
    let dataset = Dataset::load(&args.source)?;
    let mut converted = Dataset::new();
    for row in dataset.rows() {
        let mut row = row.clone();
        row.file = filename_digest(Path::new(&row.file));
        converted.append(row);
    }
    let count = converted.len();
    converted.save(&args.destination)?;
    Ok(count)
}

fn main() -> ExitCode {
    env_logger::init();
    let Some(args) = Args::parse() else {
        eprintln!("Usage: convert_dataset <src.csv> <dst.csv>");
        return ExitCode::FAILURE;
    };
    match run(&args) {
        Ok(count) => {
            println!(
                "Converted {} rows into {}",
                count,
                args.destination.display()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("convert_dataset: {}", error);
            ExitCode::FAILURE
        }
    }
}
