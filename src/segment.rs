//! Target segmentation: splitting retained pages into dataset units.
//!
//! A unit is one row-to-be. The target granularity decides whether a
//! whole document, a page, or a single sentence becomes a unit.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// The granularity at which dataset rows are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// One row per document.
    File,
    /// One row per retained page.
    Page,
    /// One row per sentence within a retained page.
    Sentence,
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "page" => Ok(Self::Page),
            "sentence" => Ok(Self::Sentence),
            other => Err(Error::Configuration(format!(
                "unknown target '{}' (expected 'file', 'page' or 'sentence')",
                other
            ))),
        }
    }
}

/// One segment of text to be scored and stored as a dataset row.
///
/// `number` is 0 for file-level units and the original 1-indexed page
/// number otherwise; sentence units of the same page share a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Unit number recorded in the dataset row.
    pub number: u32,
    /// The unit text.
    pub text: String,
}

/// Trait for splitting page text into sentences.
///
/// The GUI collaborator may inject a model-backed implementation; the
/// crate ships [`RuleSentencizer`] as the default.
pub trait Sentencizer {
    /// Split a string into sentences, in order.
    fn sentencize(&self, text: &str) -> Vec<String>;
}

/// Rule-based sentence splitter.
///
/// Splits after runs of sentence-ending punctuation followed by
/// whitespace. No abbreviation handling; adequate for the kind of
/// normalized page text the readers produce.
#[derive(Debug, Default)]
pub struct RuleSentencizer;

impl RuleSentencizer {
    /// Create the default rule-based sentencizer.
    pub fn new() -> Self {
        Self
    }
}

fn boundary_regex() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("valid regex"))
}

impl Sentencizer for RuleSentencizer {
    fn sentencize(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for boundary in boundary_regex().find_iter(text) {
            let sentence = text[start..boundary.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = boundary.end();
        }
        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }
}

/// Transform retained pages into ordered units for the given target.
///
/// `pages` holds (1-indexed page number, page text) pairs in page order.
/// Output order is (page, within-page) and is relied upon by scoring and
/// row appending.
pub fn segment(
    target: Target,
    pages: &[(u32, String)],
    sentencizer: &dyn Sentencizer,
) -> Vec<Unit> {
    match target {
        Target::File => {
            if pages.is_empty() {
                return Vec::new();
            }
            let joined = pages
                .iter()
                .map(|(_, text)| text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            vec![Unit {
                number: 0,
                text: joined,
            }]
        }
        Target::Page => pages
            .iter()
            .map(|(number, text)| Unit {
                number: *number,
                text: text.clone(),
            })
            .collect(),
        Target::Sentence => pages
            .iter()
            .flat_map(|(number, text)| {
                sentencizer
                    .sentencize(text)
                    .into_iter()
                    .map(|sentence| Unit {
                        number: *number,
                        text: sentence,
                    })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<(u32, String)> {
        vec![
            (1, "First page text. It has two sentences.".to_string()),
            (3, "Third page text.".to_string()),
        ]
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("file".parse::<Target>().unwrap(), Target::File);
        assert_eq!("Page".parse::<Target>().unwrap(), Target::Page);
        assert_eq!("SENTENCE".parse::<Target>().unwrap(), Target::Sentence);
        assert!(matches!(
            "paragraph".parse::<Target>().unwrap_err(),
            Error::Configuration(_)
        ));
    }

    #[test]
    fn test_file_target_joins_pages_in_order() {
        let units = segment(Target::File, &pages(), &RuleSentencizer::new());
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].number, 0);
        assert_eq!(
            units[0].text,
            "First page text. It has two sentences. Third page text."
        );
    }

    #[test]
    fn test_file_target_with_no_retained_pages_yields_nothing() {
        let units = segment(Target::File, &[], &RuleSentencizer::new());
        assert!(units.is_empty());
    }

    #[test]
    fn test_page_target_keeps_original_page_numbers() {
        let units = segment(Target::Page, &pages(), &RuleSentencizer::new());
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].number, 1);
        assert_eq!(units[1].number, 3);
        assert_eq!(units[1].text, "Third page text.");
    }

    #[test]
    fn test_sentence_target_shares_page_number_within_page() {
        let units = segment(Target::Sentence, &pages(), &RuleSentencizer::new());
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].number, 1);
        assert_eq!(units[0].text, "First page text.");
        assert_eq!(units[1].number, 1);
        assert_eq!(units[1].text, "It has two sentences.");
        assert_eq!(units[2].number, 3);
    }

    #[test]
    fn test_sentence_units_are_grouped_by_nondecreasing_page() {
        let units = segment(Target::Sentence, &pages(), &RuleSentencizer::new());
        let numbers: Vec<u32> = units.iter().map(|u| u.number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn test_sentencizer_handles_trailing_fragment() {
        let sentences = RuleSentencizer::new().sentencize("Done. And a fragment");
        assert_eq!(sentences, vec!["Done.", "And a fragment"]);
    }

    #[test]
    fn test_sentencizer_handles_quotes_and_questions() {
        let sentences =
            RuleSentencizer::new().sentencize("Is it so? \"Yes.\" Then we proceed!");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "Is it so?");
    }

    #[test]
    fn test_sentencizer_empty_input() {
        assert!(RuleSentencizer::new().sentencize("").is_empty());
        assert!(RuleSentencizer::new().sentencize("   ").is_empty());
    }
}
