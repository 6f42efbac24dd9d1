//! Merge two dataset files into one.
//!
//! Rows of the second dataset whose file identifier already appears in
//! the first are dropped, so a document labeled in both inputs keeps the
//! labels of the first.
//!
//! Usage:
//!   merge_datasets <src1.csv> <src2.csv> <dst.csv>

use benkpress::Dataset;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    first: PathBuf,
    second: PathBuf,
    destination: PathBuf,
}

impl Args {
    fn parse() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        if args.len() != 4 {
            return None;
        }
        Some(Self {
            first: PathBuf::from(&args[1]),
            second: PathBuf::from(&args[2]),
            destination: PathBuf::from(&args[3]),
        })
    }
}

fn run(args: &Args) -> benkpress::Result<(usize, usize)> {
    let first = Dataset::load(&args.first)?;
    let second = Dataset::load(&args.second)?;

    let seen: HashSet<&str> = first.rows().iter().map(|row| row.file.as_str()).collect();

    let mut merged = Dataset::new();
    for row in first.rows() {
        merged.append(row.clone());
    }
    let mut dropped = 0;
    for row in second.rows() {
        if seen.contains(row.file.as_str()) {
            dropped += 1;
        } else {
            merged.append(row.clone());
        }
    }
    let total = merged.len();
    merged.save(&args.destination)?;
    Ok((total, dropped))
}

fn main() -> ExitCode {
    env_logger::init();
    let Some(args) = Args::parse() else {
        eprintln!("Usage: merge_datasets <src1.csv> <src2.csv> <dst.csv>");
        return ExitCode::FAILURE;
    };
    match run(&args) {
        Ok((total, dropped)) => {
            println!(
                "Merged into {} ({} rows, {} duplicate-file rows dropped)",
                args.destination.display(),
                total,
                dropped
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("merge_datasets: {}", error);
            ExitCode::FAILURE
        }
    }
}
