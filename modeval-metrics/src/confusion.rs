//! Confusion matrices and the classification metrics derived from them.
//!
//! [`ConfusionMatrix`] counts `(actual, predicted)` class pairs for any number
//! of classes and derives per-class precision / recall / F1 / specificity and
//! their macro averages. [`BinaryCounts`] is the TP / FP / FN / TN view of a
//! 2-class matrix with class 1 as the positive class.

use modeval_core::{ModevalError, Result};

use crate::check_paired;

// ---------------------------------------------------------------------------
// Confusion Matrix
// ---------------------------------------------------------------------------

/// Row-major confusion matrix for multi-class classification.
///
/// Entry `(i, j)` counts samples whose **actual** class is `i` and
/// **predicted** class is `j`. Cells always sum to the number of rows it was
/// built from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfusionMatrix {
    /// Row-major storage: `matrix[actual * n_classes + predicted]`.
    matrix: Vec<usize>,
    /// Number of classes.
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Build a `n_classes × n_classes` confusion matrix from actual and
    /// predicted label vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices are empty, have different lengths,
    /// `n_classes` is zero, or any label lies outside `[0, n_classes)`.
    pub fn from_labels(actual: &[usize], predicted: &[usize], n_classes: usize) -> Result<Self> {
        check_paired(actual.len(), predicted.len())?;
        if n_classes == 0 {
            return Err(ModevalError::InvalidInput(
                "number of classes must be at least 1".into(),
            ));
        }

        let mut matrix = vec![0usize; n_classes * n_classes];
        for (row, (&a, &p)) in actual.iter().zip(predicted).enumerate() {
            if a >= n_classes {
                return Err(ModevalError::InvalidInput(format!(
                    "row {row}: actual class {a} outside [0, {n_classes})"
                )));
            }
            if p >= n_classes {
                return Err(ModevalError::InvalidInput(format!(
                    "row {row}: predicted class {p} outside [0, {n_classes})"
                )));
            }
            matrix[a * n_classes + p] += 1;
        }

        Ok(Self { matrix, n_classes })
    }

    /// Number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Get the count for a specific (actual, predicted) pair.
    ///
    /// # Panics
    ///
    /// Panics if either class is `>= n_classes`.
    #[inline]
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        assert!(actual < self.n_classes && predicted < self.n_classes);
        self.matrix[actual * self.n_classes + predicted]
    }

    /// One row of counts per actual class.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.matrix.chunks(self.n_classes)
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.matrix.iter().sum()
    }

    /// True positives for a given class.
    pub fn true_positives(&self, class: usize) -> usize {
        self.get(class, class)
    }

    /// False positives for a given class (predicted as `class` but actually
    /// something else).
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&i| i != class)
            .map(|i| self.get(i, class))
            .sum()
    }

    /// False negatives for a given class (actually `class` but predicted as
    /// something else).
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&j| j != class)
            .map(|j| self.get(class, j))
            .sum()
    }

    /// True negatives for a given class.
    pub fn true_negatives(&self, class: usize) -> usize {
        self.total()
            - self.true_positives(class)
            - self.false_positives(class)
            - self.false_negatives(class)
    }

    /// Overall accuracy (correct predictions / total).
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|c| self.get(c, c)).sum();
        correct as f64 / total as f64
    }

    /// Precision for a given class: `TP / (TP + FP)`.
    ///
    /// Returns 0.0 if `TP + FP == 0`.
    pub fn precision(&self, class: usize) -> f64 {
        ratio(
            self.true_positives(class),
            self.true_positives(class) + self.false_positives(class),
        )
    }

    /// Recall (sensitivity) for a given class: `TP / (TP + FN)`.
    ///
    /// Returns 0.0 if `TP + FN == 0`.
    pub fn recall(&self, class: usize) -> f64 {
        ratio(
            self.true_positives(class),
            self.true_positives(class) + self.false_negatives(class),
        )
    }

    /// F1 score for a given class (harmonic mean of precision and recall).
    ///
    /// Returns 0.0 if both precision and recall are 0.
    pub fn f1(&self, class: usize) -> f64 {
        f1_from(self.precision(class), self.recall(class))
    }

    /// Specificity for a given class: `TN / (TN + FP)`.
    ///
    /// Returns 0.0 if `TN + FP == 0`.
    pub fn specificity(&self, class: usize) -> f64 {
        ratio(
            self.true_negatives(class),
            self.true_negatives(class) + self.false_positives(class),
        )
    }

    /// Unweighted mean of per-class precision.
    pub fn macro_precision(&self) -> f64 {
        self.macro_average(Self::precision)
    }

    /// Unweighted mean of per-class recall.
    pub fn macro_recall(&self) -> f64 {
        self.macro_average(Self::recall)
    }

    /// Unweighted mean of per-class F1.
    pub fn macro_f1(&self) -> f64 {
        self.macro_average(Self::f1)
    }

    fn macro_average(&self, metric: fn(&Self, usize) -> f64) -> f64 {
        let sum: f64 = (0..self.n_classes).map(|c| metric(self, c)).sum();
        sum / self.n_classes as f64
    }

    /// TP / FP / FN / TN view of a 2-class matrix, class 1 positive.
    ///
    /// # Errors
    ///
    /// Returns an error unless the matrix has exactly 2 classes.
    pub fn binary(&self) -> Result<BinaryCounts> {
        if self.n_classes != 2 {
            return Err(ModevalError::InvalidInput(format!(
                "binary counts need a 2-class matrix, got {} classes",
                self.n_classes
            )));
        }
        Ok(BinaryCounts {
            tn: self.get(0, 0),
            fp: self.get(0, 1),
            fn_: self.get(1, 0),
            tp: self.get(1, 1),
        })
    }
}

// ---------------------------------------------------------------------------
// Binary counts
// ---------------------------------------------------------------------------

/// Cells of a binary confusion matrix.
///
/// `matrix[0][0] = TN`, `matrix[0][1] = FP`, `matrix[1][0] = FN`, `matrix[1][1] = TP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinaryCounts {
    pub tp: usize,
    pub fp: usize,
    #[cfg_attr(feature = "serde", serde(rename = "fn"))]
    pub fn_: usize,
    pub tn: usize,
}

impl BinaryCounts {
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.fn_ + self.tn
    }

    /// `(TP + TN) / (TP + TN + FP + FN)`, 0.0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    /// `TP / (TP + FP)`, 0.0 when nothing was predicted positive.
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// `TP / (TP + FN)`, 0.0 when there are no actual positives.
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// Harmonic mean of precision and recall, 0.0 when both are 0.
    pub fn f1(&self) -> f64 {
        f1_from(self.precision(), self.recall())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `num / denom`, or 0.0 when `denom == 0`.
#[inline]
fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

#[inline]
fn f1_from(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn labelled(max_k: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1..=max_k).prop_flat_map(|k| {
            (Just(k), proptest::collection::vec((0..k, 0..k), 1..200))
        })
    }

    proptest! {
        #[test]
        fn cells_sum_to_row_count((k, rows) in labelled(8)) {
            let (actual, predicted): (Vec<usize>, Vec<usize>) = rows.into_iter().unzip();
            let cm = ConfusionMatrix::from_labels(&actual, &predicted, k).unwrap();
            prop_assert_eq!(cm.total(), actual.len());
            for c in 0..k {
                prop_assert_eq!(
                    cm.true_positives(c) + cm.false_positives(c)
                        + cm.false_negatives(c) + cm.true_negatives(c),
                    actual.len()
                );
            }
        }

        #[test]
        fn derived_metrics_in_unit_interval((k, rows) in labelled(6)) {
            let (actual, predicted): (Vec<usize>, Vec<usize>) = rows.into_iter().unzip();
            let cm = ConfusionMatrix::from_labels(&actual, &predicted, k).unwrap();
            for c in 0..k {
                for m in [cm.precision(c), cm.recall(c), cm.f1(c), cm.specificity(c)] {
                    prop_assert!((0.0..=1.0).contains(&m));
                }
            }
        }
    }
}
