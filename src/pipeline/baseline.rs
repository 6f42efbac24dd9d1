//! Baseline scoring pipeline: token counts + multinomial naive Bayes.
//!
//! Deliberately simple. It exists so a fresh session has a working
//! pipeline to refit against, and as the reference implementation of the
//! [`Pipeline`] contract for plug-in authors.

use crate::error::{Error, Result};
use crate::pipeline::Pipeline;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Count-vectorizing multinomial naive Bayes classifier.
///
/// Tokens are lowercased alphanumeric runs. Laplace smoothing keeps
/// unseen-token probabilities finite. Starts unfitted; `predict` and
/// `predict_proba` fail with `UnfittedPipeline` until the first `fit`.
#[derive(Debug, Default)]
pub struct BaselinePipeline {
    model: Option<FittedModel>,
}

#[derive(Debug)]
struct FittedModel {
    /// Class labels in ascending order; row order of the arrays below.
    classes: Vec<i64>,
    /// Token to column index.
    vocabulary: HashMap<String, usize>,
    /// ln P(class)
    log_prior: Array1<f64>,
    /// ln P(token | class), classes x vocabulary
    log_likelihood: Array2<f64>,
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

impl BaselinePipeline {
    /// Create an unfitted baseline pipeline.
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Whether the pipeline has been fit at least once.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn fitted(&self) -> Result<&FittedModel> {
        self.model.as_ref().ok_or(Error::UnfittedPipeline)
    }
}

impl FittedModel {
    /// Joint log-likelihood of `text` under each class.
    fn joint_log_likelihood(&self, text: &str) -> Array1<f64> {
        let mut scores = self.log_prior.clone();
        for token in tokenize(text) {
            if let Some(&column) = self.vocabulary.get(&token) {
                for (row, score) in scores.iter_mut().enumerate() {
                    *score += self.log_likelihood[[row, column]];
                }
            }
        }
        scores
    }

    /// Normalize joint log-likelihoods into probabilities (log-sum-exp).
    fn probabilities(&self, text: &str) -> Vec<f64> {
        let joint = self.joint_log_likelihood(text);
        let max = joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = joint.iter().map(|&s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }
}

impl Pipeline for BaselinePipeline {
    fn fit(&mut self, texts: &[String], labels: &[i64]) -> Result<()> {
        if texts.is_empty() {
            return Err(Error::Refit("cannot fit on an empty dataset".to_string()));
        }
        if texts.len() != labels.len() {
            return Err(Error::Refit(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }

        let mut classes: Vec<i64> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for token in tokenize(text) {
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }
        if vocabulary.is_empty() {
            return Err(Error::Refit(
                "no tokens found in the training texts".to_string(),
            ));
        }

        let class_index: HashMap<i64, usize> = classes
            .iter()
            .enumerate()
            .map(|(index, &class)| (class, index))
            .collect();

        let mut token_counts = Array2::<f64>::zeros((classes.len(), vocabulary.len()));
        let mut class_counts = Array1::<f64>::zeros(classes.len());
        for (text, label) in texts.iter().zip(labels) {
            let row = class_index[label];
            class_counts[row] += 1.0;
            for token in tokenize(text) {
                token_counts[[row, vocabulary[&token]]] += 1.0;
            }
        }

        let total = texts.len() as f64;
        let log_prior = class_counts.mapv(|count| (count / total).ln());

        // Laplace smoothing: one pseudo-count per token per class.
        let vocabulary_size = vocabulary.len() as f64;
        let mut log_likelihood = Array2::<f64>::zeros(token_counts.dim());
        for row in 0..classes.len() {
            let class_total: f64 = token_counts.row(row).sum();
            for column in 0..vocabulary.len() {
                log_likelihood[[row, column]] = ((token_counts[[row, column]] + 1.0)
                    / (class_total + vocabulary_size))
                    .ln();
            }
        }

        log::debug!(
            "Fitted baseline pipeline: {} documents, {} classes, {} tokens",
            texts.len(),
            classes.len(),
            vocabulary.len()
        );

        self.model = Some(FittedModel {
            classes,
            vocabulary,
            log_prior,
            log_likelihood,
        });
        Ok(())
    }

    fn predict(&self, texts: &[String]) -> Result<Vec<i64>> {
        let model = self.fitted()?;
        Ok(texts
            .iter()
            .map(|text| {
                let joint = model.joint_log_likelihood(text);
                let best = joint
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(index, _)| index)
                    .unwrap_or(0);
                model.classes[best]
            })
            .collect())
    }

    fn predict_proba(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        let model = self.fitted()?;
        Ok(texts.iter().map(|text| model.probabilities(text)).collect())
    }
}
