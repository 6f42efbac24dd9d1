//! Property tests tying the dataset to the segmenter: one processed
//! document appends exactly as many rows as the segmenter yields units.

use benkpress::{
    segment, BaselinePipeline, DocumentReader, PassthroughFilter, Result, RuleSentencizer,
    SampleQueue, Session, SessionConfig, Target,
};
use proptest::prelude::*;
use std::path::{Path, PathBuf};

struct OwnedReader {
    pages: Vec<String>,
}

impl DocumentReader for OwnedReader {
    fn read(&self, _path: &Path) -> Result<Vec<String>> {
        Ok(self.pages.clone())
    }

    fn name(&self) -> &'static str {
        "owned"
    }
}

fn page_text() -> impl Strategy<Value = String> {
    // Word-ish page content with occasional sentence punctuation, the
    // shape of text the readers produce after whitespace normalization.
    proptest::collection::vec("[a-z]{1,8}[.!?]?", 0..30).prop_map(|words| words.join(" "))
}

fn target() -> impl Strategy<Value = Target> {
    prop_oneof![
        Just(Target::File),
        Just(Target::Page),
        Just(Target::Sentence),
    ]
}

proptest! {
    #[test]
    fn row_count_equals_unit_count(pages in proptest::collection::vec(page_text(), 0..6), target in target()) {
        let expected_pages: Vec<(u32, String)> = pages
            .iter()
            .enumerate()
            .map(|(i, text)| (i as u32 + 1, text.clone()))
            .collect();
        let expected_units = segment(target, &expected_pages, &RuleSentencizer::new());

        let mut session = Session::from_parts(
            SessionConfig { target, ..SessionConfig::default() },
            Box::new(OwnedReader { pages }),
            Box::new(PassthroughFilter),
            Box::new(BaselinePipeline::new()),
            Box::new(RuleSentencizer::new()),
        );
        session.set_sample(SampleQueue::with_seed(vec![PathBuf::from("doc.pdf")], 0));
        session.next_document().unwrap();

        prop_assert_eq!(session.dataset().len(), expected_units.len());
        for (row, unit) in session.dataset().rows().iter().zip(&expected_units) {
            prop_assert_eq!(row.unit_number, unit.number);
            prop_assert_eq!(&row.text, &unit.text);
        }
    }

    #[test]
    fn unit_numbers_never_decrease(pages in proptest::collection::vec(page_text(), 0..6), target in target()) {
        let numbered: Vec<(u32, String)> = pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| (i as u32 + 1, text))
            .collect();
        let units = segment(target, &numbered, &RuleSentencizer::new());
        let numbers: Vec<u32> = units.iter().map(|u| u.number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        prop_assert_eq!(numbers, sorted);
    }
}
