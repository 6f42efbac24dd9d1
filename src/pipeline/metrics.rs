//! Classification metrics for the benchmark report.
//!
//! Per-class precision/recall/F1, a confusion matrix, and AUROC over
//! positive-class scores. Rendered as plain text for the benchmark view.

use crate::error::{Error, Result};
use std::fmt;

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    /// The class label.
    pub class: i64,
    /// Precision: TP / (TP + FP). Zero when nothing was predicted as
    /// this class.
    pub precision: f64,
    /// Recall: TP / (TP + FN). Zero when the class has no true members.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Number of true members of this class.
    pub support: usize,
}

/// Confusion matrix over the union of true and predicted labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    /// Class labels in ascending order; index order of `counts`.
    pub classes: Vec<i64>,
    /// counts[i][j] = rows with true class i predicted as class j.
    pub counts: Vec<Vec<usize>>,
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "true\\pred")?;
        for class in &self.classes {
            write!(f, " {:>8}", class)?;
        }
        writeln!(f)?;
        for (i, class) in self.classes.iter().enumerate() {
            write!(f, "{:>9}", class)?;
            for count in &self.counts[i] {
                write!(f, " {:>8}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn class_union(y_true: &[i64], y_pred: &[i64]) -> Vec<i64> {
    let mut classes: Vec<i64> = y_true.iter().chain(y_pred.iter()).copied().collect();
    classes.sort_unstable();
    classes.dedup();
    classes
}

/// Build the confusion matrix for a fold.
pub fn confusion_matrix(y_true: &[i64], y_pred: &[i64]) -> ConfusionMatrix {
    let classes = class_union(y_true, y_pred);
    let index = |class: i64| classes.binary_search(&class).expect("class in union");
    let mut counts = vec![vec![0usize; classes.len()]; classes.len()];
    for (&actual, &predicted) in y_true.iter().zip(y_pred) {
        counts[index(actual)][index(predicted)] += 1;
    }
    ConfusionMatrix { classes, counts }
}

/// Per-class precision, recall and F1.
pub fn classification_report(y_true: &[i64], y_pred: &[i64]) -> Vec<ClassMetrics> {
    let matrix = confusion_matrix(y_true, y_pred);
    let n = matrix.classes.len();
    let mut report = Vec::with_capacity(n);
    for i in 0..n {
        let tp = matrix.counts[i][i] as f64;
        let predicted: f64 = (0..n).map(|row| matrix.counts[row][i] as f64).sum();
        let actual: f64 = matrix.counts[i].iter().map(|&c| c as f64).sum();

        let precision = if predicted > 0.0 { tp / predicted } else { 0.0 };
        let recall = if actual > 0.0 { tp / actual } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        report.push(ClassMetrics {
            class: matrix.classes[i],
            precision,
            recall,
            f1,
            support: actual as usize,
        });
    }
    report
}

/// Render a classification report as aligned plain text.
pub fn render_report(report: &[ClassMetrics]) -> String {
    let mut out = String::from("class  precision  recall      f1  support\n");
    for metrics in report {
        out.push_str(&format!(
            "{:>5}  {:>9.3}  {:>6.3}  {:>6.3}  {:>7}\n",
            metrics.class, metrics.precision, metrics.recall, metrics.f1, metrics.support
        ));
    }
    out
}

/// Area under the ROC curve for binary labels and positive-class scores.
///
/// Computed as the normalized Mann-Whitney U statistic with average
/// ranks for tied scores. Fails if the fold contains a single class,
/// which makes the curve undefined.
pub fn auroc(y_true: &[i64], scores: &[f64]) -> Result<f64> {
    let positives = y_true.iter().filter(|&&label| label != 0).count();
    let negatives = y_true.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(Error::Refit(
            "AUROC undefined: fold contains a single class".to_string(),
        ));
    }

    // Average ranks, ties shared.
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    let mut ranks = vec![0.0f64; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let average_rank = (i + j) as f64 / 2.0 + 1.0;
        for &index in &order[i..=j] {
            ranks[index] = average_rank;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(&label, _)| label != 0)
        .map(|(_, &rank)| rank)
        .sum();
    let p = positives as f64;
    let n = negatives as f64;
    let u = positive_rank_sum - p * (p + 1.0) / 2.0;
    Ok(u / (p * n))
}
