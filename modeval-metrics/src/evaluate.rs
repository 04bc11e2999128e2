//! End-to-end evaluation of a model's predictions.
//!
//! One entry point per model kind. Each validates its inputs, derives hard
//! labels where needed, and computes every metric for that kind into a report.
//! Metrics that can be undefined on otherwise valid data (AUC-ROC, MARE) are
//! reported as [`Metric::Unavailable`] instead of failing the whole report.

use modeval_core::{ModevalError, ProbVector, Result, Summarizable};

use crate::check_paired;
use crate::confusion::{BinaryCounts, ConfusionMatrix};
use crate::labels::{binary_labels, predicted_classes, thresholded_classes, DEFAULT_THRESHOLD};
use crate::loss::{binary_cross_entropy, categorical_cross_entropy};
use crate::regression::{mae, mare, mse, MarePolicy};
use crate::roc::{roc_auc, RocTies};

// ---------------------------------------------------------------------------
// Metric outcome
// ---------------------------------------------------------------------------

/// A metric value, or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum Metric {
    Value(f64),
    Unavailable(String),
}

impl Metric {
    /// Demote a [`ModevalError::Degenerate`] failure to [`Metric::Unavailable`];
    /// every other error is passed through.
    pub fn isolate(result: Result<f64>) -> Result<Self> {
        match result {
            Ok(v) => Ok(Self::Value(v)),
            Err(ModevalError::Degenerate(reason)) => Ok(Self::Unavailable(reason)),
            Err(e) => Err(e),
        }
    }

    /// The value, if it was computed.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unavailable(_) => None,
        }
    }
}

fn fmt_metric(m: &Metric) -> String {
    match m {
        Metric::Value(v) => format!("{v:.4}"),
        Metric::Unavailable(_) => "n/a".into(),
    }
}

// ---------------------------------------------------------------------------
// Multi-class
// ---------------------------------------------------------------------------

/// Configuration for [`evaluate_multiclass`].
#[derive(Debug, Clone, PartialEq)]
pub struct MulticlassConfig {
    /// Number of classes K; labels must lie in `[0, K)`.
    pub n_classes: usize,
}

impl Default for MulticlassConfig {
    fn default() -> Self {
        Self { n_classes: 5 }
    }
}

/// Evaluation results for a multi-class classifier.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MulticlassReport {
    pub n_samples: usize,
    pub n_classes: usize,
    /// Categorical cross-entropy.
    pub cross_entropy: f64,
    /// Actual class × argmax-predicted class.
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
}

impl Summarizable for MulticlassReport {
    fn summary(&self) -> String {
        format!(
            "n={}, k={}, ce={:.4}, accuracy={:.4}, macro_f1={:.4}",
            self.n_samples, self.n_classes, self.cross_entropy, self.accuracy, self.macro_f1,
        )
    }
}

/// Evaluate a multi-class classifier.
///
/// `actual` holds 0-based class labels, `predicted` one probability vector of
/// width `config.n_classes` per row. Predicted labels are the argmax of each
/// vector, ties going to the lowest class.
///
/// # Errors
///
/// Returns an error if the inputs are empty or misaligned, a probability vector
/// has the wrong width, or a label lies outside `[0, n_classes)`.
pub fn evaluate_multiclass(
    actual: &[usize],
    predicted: &[ProbVector],
    config: &MulticlassConfig,
) -> Result<MulticlassReport> {
    check_paired(actual.len(), predicted.len())?;
    let k = config.n_classes;
    if let Some((row, v)) = predicted.iter().enumerate().find(|(_, v)| v.len() != k) {
        return Err(ModevalError::InvalidInput(format!(
            "row {row}: expected {k} class probabilities, got {}",
            v.len()
        )));
    }

    let labels = predicted_classes(predicted)?;
    let confusion = ConfusionMatrix::from_labels(actual, &labels, k)?;
    let cross_entropy = categorical_cross_entropy(actual, predicted)?;

    let report = MulticlassReport {
        n_samples: actual.len(),
        n_classes: k,
        cross_entropy,
        accuracy: confusion.accuracy(),
        macro_precision: confusion.macro_precision(),
        macro_recall: confusion.macro_recall(),
        macro_f1: confusion.macro_f1(),
        confusion,
    };
    tracing::debug!(summary = %report.summary(), "evaluated multi-class classifier");
    Ok(report)
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

/// Configuration for [`evaluate_binary`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryConfig {
    /// Probabilities `>= threshold` are predicted positive.
    pub threshold: f64,
    /// Tie handling for AUC-ROC.
    pub roc_ties: RocTies,
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            roc_ties: RocTies::default(),
        }
    }
}

/// Evaluation results for a binary classifier.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinaryReport {
    pub n_samples: usize,
    pub positives: usize,
    pub negatives: usize,
    pub threshold: f64,
    /// Binary cross-entropy.
    pub cross_entropy: f64,
    pub counts: BinaryCounts,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub auc_roc: Metric,
}

impl Summarizable for BinaryReport {
    fn summary(&self) -> String {
        format!(
            "n={}, bce={:.4}, accuracy={:.4}, f1={:.4}, auc={}",
            self.n_samples,
            self.cross_entropy,
            self.accuracy,
            self.f1,
            fmt_metric(&self.auc_roc),
        )
    }
}

/// Evaluate a binary classifier.
///
/// `actual` holds 0/1 labels, `predicted` the probability of class 1 for each
/// row. AUC-ROC is [`Metric::Unavailable`] when only one class is present; the
/// other metrics are still computed.
///
/// # Errors
///
/// Returns an error if the inputs are empty or misaligned, a label is not 0 or
/// 1, a probability is outside `[0, 1]`, or the threshold is not finite.
pub fn evaluate_binary(
    actual: &[usize],
    predicted: &[f64],
    config: &BinaryConfig,
) -> Result<BinaryReport> {
    check_paired(actual.len(), predicted.len())?;
    if !config.threshold.is_finite() {
        return Err(ModevalError::InvalidInput(format!(
            "threshold {} is not finite",
            config.threshold
        )));
    }
    let truth = binary_labels(actual)?;

    // Also rejects probabilities outside [0, 1].
    let cross_entropy = binary_cross_entropy(actual, predicted)?;
    let labels = thresholded_classes(predicted, config.threshold);
    let counts = ConfusionMatrix::from_labels(actual, &labels, 2)?.binary()?;
    let auc_roc = Metric::isolate(roc_auc(predicted, &truth, config.roc_ties))?;

    let positives = truth.iter().filter(|&&t| t).count();
    let report = BinaryReport {
        n_samples: actual.len(),
        positives,
        negatives: actual.len() - positives,
        threshold: config.threshold,
        cross_entropy,
        counts,
        accuracy: counts.accuracy(),
        precision: counts.precision(),
        recall: counts.recall(),
        f1: counts.f1(),
        auc_roc,
    };
    tracing::debug!(summary = %report.summary(), "evaluated binary classifier");
    Ok(report)
}

// ---------------------------------------------------------------------------
// Regression
// ---------------------------------------------------------------------------

/// Configuration for [`evaluate_regression`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegressionConfig {
    pub mare: MarePolicy,
}

/// Evaluation results for a single-variable regressor.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegressionReport {
    pub n_samples: usize,
    pub mse: f64,
    pub mae: f64,
    /// Mean absolute relative error, in percent.
    pub mare: Metric,
    pub mare_policy: MarePolicy,
    /// Rows excluded from MARE because their actual value is zero.
    pub zero_actual_rows: usize,
}

impl Summarizable for RegressionReport {
    fn summary(&self) -> String {
        format!(
            "n={}, mse={:.4}, mae={:.4}, mare={}",
            self.n_samples,
            self.mse,
            self.mae,
            fmt_metric(&self.mare),
        )
    }
}

/// Evaluate a single-variable regressor.
///
/// # Errors
///
/// Returns an error if the inputs are empty or misaligned. A MARE that is
/// undefined under the configured policy is reported as
/// [`Metric::Unavailable`].
pub fn evaluate_regression(
    actual: &[f64],
    predicted: &[f64],
    config: &RegressionConfig,
) -> Result<RegressionReport> {
    check_paired(actual.len(), predicted.len())?;

    let report = RegressionReport {
        n_samples: actual.len(),
        mse: mse(actual, predicted)?,
        mae: mae(actual, predicted)?,
        mare: Metric::isolate(mare(actual, predicted, config.mare))?,
        mare_policy: config.mare,
        zero_actual_rows: actual.iter().filter(|&&a| a == 0.0).count(),
    };
    tracing::debug!(summary = %report.summary(), "evaluated regressor");
    Ok(report)
}
