//! End-to-end tests for the "process next document" workflow.

use benkpress::{
    BaselinePipeline, DocumentReader, PageFilter, PassthroughFilter, Pipeline, Result,
    RuleSentencizer, SampleQueue, Session, SessionConfig, Target,
};
use std::path::{Path, PathBuf};

/// Reader returning the same canned pages for every document.
struct CannedReader {
    pages: Vec<&'static str>,
}

impl DocumentReader for CannedReader {
    fn read(&self, _path: &Path) -> Result<Vec<String>> {
        Ok(self.pages.iter().map(|p| p.to_string()).collect())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

/// Filter rejecting pages that contain a marker token.
struct RejectMarked;

impl PageFilter for RejectMarked {
    fn accepts(&self, text: &str) -> bool {
        !text.contains("IRRELEVANT")
    }
}

fn build_session(
    target: Target,
    pages: Vec<&'static str>,
    filter: Box<dyn PageFilter>,
) -> Session {
    Session::from_parts(
        SessionConfig {
            target,
            ..SessionConfig::default()
        },
        Box::new(CannedReader { pages }),
        filter,
        Box::new(BaselinePipeline::new()),
        Box::new(RuleSentencizer::new()),
    )
}

fn queue_of(names: &[&str]) -> SampleQueue {
    SampleQueue::with_seed(names.iter().map(PathBuf::from).collect(), 42)
}

/// The documented example scenario: a two-page document whose first page
/// is rejected by the filter, processed at sentence granularity, yields
/// exactly one row with the page number of the accepted page.
#[test]
fn test_sentence_target_with_rejected_first_page() {
    let mut session = build_session(
        Target::Sentence,
        vec!["IRRELEVANT boilerplate", "Revenue grew."],
        Box::new(RejectMarked),
    );
    session.set_sample(queue_of(&["A.pdf"]));

    session.next_document().unwrap();

    let rows = session.dataset().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].unit_number, 2);
    assert_eq!(rows[0].text, "Revenue grew.");
    assert_eq!(rows[0].confidence, 0.0);
    assert_eq!(rows[0].label, 0);
}

#[test]
fn test_file_target_one_row_per_document() {
    let mut session = build_session(
        Target::File,
        vec!["Page one text.", "Page two text."],
        Box::new(PassthroughFilter),
    );
    session.set_sample(queue_of(&["a.pdf", "b.pdf", "c.pdf"]));

    while session.next_document().unwrap().is_some() {}

    let rows = session.dataset().rows();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row.unit_number, 0);
        assert_eq!(row.text, "Page one text. Page two text.");
    }
}

#[test]
fn test_page_target_rows_follow_page_order() {
    let mut session = build_session(
        Target::Page,
        vec!["First.", "IRRELEVANT", "Third."],
        Box::new(RejectMarked),
    );
    session.set_sample(queue_of(&["a.pdf"]));
    session.next_document().unwrap();

    let rows = session.dataset().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].unit_number, 1);
    assert_eq!(rows[1].unit_number, 3);
}

#[test]
fn test_sentence_rows_grouped_by_page_in_order() {
    let mut session = build_session(
        Target::Sentence,
        vec!["One. Two. Three.", "Four. Five."],
        Box::new(PassthroughFilter),
    );
    session.set_sample(queue_of(&["a.pdf"]));
    session.next_document().unwrap();

    let rows = session.dataset().rows();
    assert_eq!(rows.len(), 5);
    let numbers: Vec<u32> = rows.iter().map(|r| r.unit_number).collect();
    assert_eq!(numbers, vec![1, 1, 1, 2, 2]);
    assert_eq!(rows[0].text, "One.");
    assert_eq!(rows[3].text, "Four.");
}

#[test]
fn test_empty_queue_never_mutates_dataset() {
    let mut session = build_session(Target::Page, vec!["Text."], Box::new(PassthroughFilter));
    for _ in 0..3 {
        assert!(session.next_document().unwrap().is_none());
    }
    assert!(session.dataset().is_empty());
}

#[test]
fn test_fitted_session_scores_rows() {
    let mut pipeline = BaselinePipeline::new();
    pipeline
        .fit(
            &[
                "revenue profit growth".to_string(),
                "profit margin revenue".to_string(),
                "weather rain cloud".to_string(),
                "cloud rain cold".to_string(),
            ],
            &[1, 1, 0, 0],
        )
        .unwrap();

    let mut session = Session::from_parts(
        SessionConfig {
            target: Target::Page,
            ..SessionConfig::default()
        },
        Box::new(CannedReader {
            pages: vec!["revenue profit numbers"],
        }),
        Box::new(PassthroughFilter),
        Box::new(pipeline),
        Box::new(RuleSentencizer::new()),
    );
    session.set_sample(queue_of(&["q.pdf"]));
    session.next_document().unwrap();

    let row = &session.dataset().rows()[0];
    assert_eq!(row.label, 1);
    assert!(row.confidence > 0.5);
}

#[test]
fn test_refit_then_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let dataset_path = dir.path().join("session.csv");

    let mut session = build_session(
        Target::Sentence,
        vec![
            "Revenue grew this quarter. Profit margins improved. Sales increased again.",
            "The weather was rainy. Clouds covered the sky. It was cold outside.",
        ],
        Box::new(PassthroughFilter),
    );
    session.set_sample(queue_of(&["a.pdf", "b.pdf"]));
    while session.next_document().unwrap().is_some() {}

    // Label the rows by hand: financial sentences positive.
    let labels: Vec<(usize, &str)> = session
        .dataset()
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if row.text.contains("Revenue")
                || row.text.contains("Profit")
                || row.text.contains("Sales")
            {
                (i, "1")
            } else {
                (i, "0")
            }
        })
        .collect();
    for (index, label) in labels {
        session
            .dataset_mut()
            .edit(index, benkpress::Column::Label, label)
            .unwrap();
    }

    let report = session.refit();
    // Twelve rows across two balanced classes: cross-validation is
    // expected to complete and the final refit to succeed.
    assert!(report.refit_succeeded());

    session.save_dataset(&dataset_path).unwrap();
    assert!(dataset_path.exists());

    let reloaded = benkpress::Dataset::load(&dataset_path).unwrap();
    assert_eq!(reloaded.rows(), session.dataset().rows());
    assert_eq!(reloaded.state(), benkpress::SaveState::Saved);
}
