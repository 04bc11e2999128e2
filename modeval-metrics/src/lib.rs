//! Evaluation metrics for classifiers and single-variable regressors.
//!
//! - **Label derivation** — argmax and threshold rules turning scores into classes
//! - **Confusion matrix** — K-class counts with per-class and macro-averaged metrics
//! - **Losses** — categorical and binary cross-entropy with probability clamping
//! - **ROC / AUC** — rank-sorted trapezoidal integration with explicit tie policy
//! - **Regression** — MSE, MAE, and MARE with a configurable denominator policy
//! - **Evaluation** — one entry point per model kind, returning a full report
//!
//! All functions are pure: they borrow their inputs and never perform I/O.

pub mod confusion;
pub mod evaluate;
pub mod labels;
pub mod loss;
pub mod regression;
pub mod roc;

pub use confusion::{BinaryCounts, ConfusionMatrix};
pub use evaluate::{
    evaluate_binary, evaluate_multiclass, evaluate_regression, BinaryConfig, BinaryReport,
    Metric, MulticlassConfig, MulticlassReport, RegressionConfig, RegressionReport,
};
pub use labels::{argmax_class, threshold_class, DEFAULT_THRESHOLD};
pub use loss::{binary_cross_entropy, categorical_cross_entropy};
pub use regression::{mae, mare, mse, MarePolicy};
pub use roc::{roc_auc, roc_curve, RocCurve, RocPoint, RocTies};

use modeval_core::{ModevalError, Result};

/// Reject empty or misaligned column pairs.
pub(crate) fn check_paired(actual: usize, predicted: usize) -> Result<()> {
    if actual == 0 {
        return Err(ModevalError::InvalidInput("empty input".into()));
    }
    if actual != predicted {
        return Err(ModevalError::InvalidInput(format!(
            "actual length {actual} != predicted length {predicted}"
        )));
    }
    Ok(())
}
