//! Headless end-to-end runner: process a whole sample folder into a
//! dataset CSV.
//!
//! Builds a session with the baseline plug-ins, processes every document
//! in the folder, optionally refits with k-fold benchmarking, and saves
//! the dataset (plus the benchmark log sidecar).
//!
//! Usage:
//!   process_sample <pdf-folder> <dataset.csv> [--reader textlayer|ocr]
//!                  [--target file|page|sentence] [--dpi N] [--lang CODE]
//!                  [--kfold N] [--refit] [--config session.json]
//!
//! `--config` loads a serialized [`SessionConfig`] wholesale and takes
//! precedence over the individual reader/target/kfold options.

use benkpress::{OcrConfig, ReaderConfig, ReaderKind, Session, SessionConfig, Target};
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    sample_dir: PathBuf,
    output: PathBuf,
    config: Option<SessionConfig>,
    reader: ReaderKind,
    target: Target,
    dpi: u32,
    language: String,
    kfold_splits: usize,
    refit: bool,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        if args.len() < 3 {
            return Err("missing <pdf-folder> and <dataset.csv>".to_string());
        }
        let mut parsed = Self {
            sample_dir: PathBuf::from(&args[1]),
            output: PathBuf::from(&args[2]),
            config: None,
            reader: ReaderKind::TextLayer,
            target: Target::Page,
            dpi: 100,
            language: "eng".to_string(),
            kfold_splits: 5,
            refit: false,
        };

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--reader" => {
                    i += 1;
                    let value = args.get(i).ok_or("--reader needs a value")?;
                    parsed.reader = value.parse().map_err(|e| format!("{}", e))?;
                }
                "--target" => {
                    i += 1;
                    let value = args.get(i).ok_or("--target needs a value")?;
                    parsed.target = value.parse().map_err(|e| format!("{}", e))?;
                }
                "--dpi" => {
                    i += 1;
                    let value = args.get(i).ok_or("--dpi needs a value")?;
                    parsed.dpi = value.parse().map_err(|_| "--dpi needs an integer")?;
                }
                "--lang" => {
                    i += 1;
                    parsed.language = args.get(i).ok_or("--lang needs a value")?.clone();
                }
                "--kfold" => {
                    i += 1;
                    let value = args.get(i).ok_or("--kfold needs a value")?;
                    parsed.kfold_splits =
                        value.parse().map_err(|_| "--kfold needs an integer")?;
                }
                "--config" => {
                    i += 1;
                    let value = args.get(i).ok_or("--config needs a file path")?;
                    let text = std::fs::read_to_string(value)
                        .map_err(|e| format!("cannot read '{}': {}", value, e))?;
                    let config: SessionConfig = serde_json::from_str(&text)
                        .map_err(|e| format!("invalid session config '{}': {}", value, e))?;
                    parsed.config = Some(config);
                }
                "--refit" => parsed.refit = true,
                other => return Err(format!("unknown option '{}'", other)),
            }
            i += 1;
        }
        Ok(parsed)
    }
}

fn run(args: &Args) -> benkpress::Result<()> {
    let config = match &args.config {
        Some(config) => config.clone(),
        None => {
            let reader = match args.reader {
                ReaderKind::TextLayer => ReaderConfig::text_layer(),
                ReaderKind::Ocr => ReaderConfig::ocr(OcrConfig {
                    dpi: args.dpi,
                    language: args.language.clone(),
                    ..OcrConfig::default()
                }),
            };
            SessionConfig {
                target: args.target,
                reader,
                kfold_splits: args.kfold_splits,
            }
        }
    };
    let mut session = Session::with_defaults(config)?;
    session.import_sample(&args.sample_dir)?;

    let total = session.remaining_documents();
    let mut processed = 0;
    let mut failed = 0;
    while session.remaining_documents() > 0 {
        match session.next_document() {
            Ok(Some(path)) => {
                processed += 1;
                println!("[{}/{}] {}", processed + failed, total, path.display());
            }
            Ok(None) => break,
            Err(error) => {
                // A bad document aborts only itself; keep draining the queue.
                failed += 1;
                eprintln!("[{}/{}] {}", processed + failed, total, error);
            }
        }
    }

    if args.refit {
        let report = session.refit();
        println!("{}", report);
    }

    session.save_dataset(&args.output)?;
    println!(
        "Done: {} documents processed, {} failed, {} rows written to {}",
        processed,
        failed,
        session.dataset().len(),
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = match Args::parse() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("process_sample: {}", message);
            eprintln!(
                "Usage: process_sample <pdf-folder> <dataset.csv> [--reader textlayer|ocr] \
                 [--target file|page|sentence] [--dpi N] [--lang CODE] [--kfold N] [--refit] \
                 [--config session.json]"
            );
            return ExitCode::FAILURE;
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("process_sample: {}", error);
            ExitCode::FAILURE
        }
    }
}
