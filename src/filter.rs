//! Page filters deciding whether a page's text is worth keeping.

use crate::pipeline::Pipeline;

/// Trait for deciding whether a page should be retained.
///
/// Must be a pure function of the page text: no cross-page state.
pub trait PageFilter {
    /// Return true if the page should be retained.
    fn accepts(&self, text: &str) -> bool;
}

/// Filter that retains every page. The default/baseline filter.
#[derive(Debug, Default)]
pub struct PassthroughFilter;

impl PageFilter for PassthroughFilter {
    fn accepts(&self, _text: &str) -> bool {
        true
    }
}

/// Filter backed by a classifier pipeline.
///
/// Retains a page when the pipeline predicts a nonzero label for it.
/// An unfitted or failing pipeline retains everything, matching the
/// passthrough baseline.
pub struct PipelineFilter<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PipelineFilter<P> {
    /// Wrap a classifier pipeline as a page filter.
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }
}

impl<P: Pipeline> PageFilter for PipelineFilter<P> {
    fn accepts(&self, text: &str) -> bool {
        match self.pipeline.predict(&[text.to_string()]) {
            Ok(labels) => labels.first().map(|&label| label != 0).unwrap_or(true),
            Err(_) => true,
        }
    }
}
