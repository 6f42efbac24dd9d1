//! Scoring pipelines and the refit/benchmark machinery.
//!
//! A pipeline is any classifier exposing the fit/predict/predict_proba
//! contract. The session treats pipelines as opaque plug-ins; this
//! module supplies the trait, the unfitted-score fallback, a baseline
//! implementation, and k-fold refitting with benchmark reports.

mod baseline;
pub mod metrics;
mod refit;

pub use baseline::BaselinePipeline;
pub use metrics::{auroc, classification_report, confusion_matrix, ClassMetrics, ConfusionMatrix};
pub use refit::{run_refit, FoldReport, RefitReport, DEFAULT_REFIT_SEED};

use crate::error::Result;

/// Trait for classifier pipelines scoring dataset units.
///
/// Implementations must accept a batch of size 1 without special
/// handling and return results in call order. `predict` and
/// `predict_proba` on a never-fitted pipeline return
/// [`Error::UnfittedPipeline`](crate::Error::UnfittedPipeline).
pub trait Pipeline {
    /// Fit the pipeline on texts and their integer class labels.
    fn fit(&mut self, texts: &[String], labels: &[i64]) -> Result<()>;

    /// Predict a class label per text.
    fn predict(&self, texts: &[String]) -> Result<Vec<i64>>;

    /// Predict per-class probabilities per text, classes in ascending
    /// label order.
    fn predict_proba(&self, texts: &[String]) -> Result<Vec<Vec<f64>>>;
}

/// Score one unit of text, degrading to a neutral default.
///
/// Returns (confidence, label) where confidence is the predicted
/// probability of the positive class (index 1 of a 2-class probability
/// vector). Any pipeline failure, including the unfitted case, yields
/// (0.0, 0) instead of propagating; a scoring error must never abort the
/// remaining units of a document.
pub fn score_unit(pipeline: &dyn Pipeline, text: &str) -> (f64, i64) {
    let batch = [text.to_string()];
    match (pipeline.predict_proba(&batch), pipeline.predict(&batch)) {
        (Ok(probabilities), Ok(labels)) => {
            let confidence = probabilities
                .first()
                .and_then(|row| row.get(1))
                .copied()
                .unwrap_or(0.0);
            let label = labels.first().copied().unwrap_or(0);
            (confidence, label)
        }
        _ => {
            log::debug!("Scoring pipeline unavailable, using default score");
            (0.0, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfitted_pipeline_scores_default() {
        let pipeline = BaselinePipeline::new();
        let (confidence, label) = score_unit(&pipeline, "anything");
        assert_eq!(confidence, 0.0);
        assert_eq!(label, 0);
    }

    #[test]
    fn test_fitted_pipeline_scores_positive_class_probability() {
        let mut pipeline = BaselinePipeline::new();
        pipeline
            .fit(
                &[
                    "alpha beta gamma".to_string(),
                    "alpha gamma beta".to_string(),
                    "noise words here".to_string(),
                    "here words noise".to_string(),
                ],
                &[1, 1, 0, 0],
            )
            .unwrap();
        let (confidence, label) = score_unit(&pipeline, "alpha beta");
        assert_eq!(label, 1);
        assert!(confidence > 0.5);
        assert!(confidence <= 1.0);
    }
}
