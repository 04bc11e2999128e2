//! ROC curves and the area under them.
//!
//! Rows are sorted by descending score and walked once, tracking running
//! true/false positive counts. The area is accumulated with the trapezoid
//! rule as each point is emitted, so the whole computation is `O(N log N)`.

use std::cmp::Ordering;

use modeval_core::{ModevalError, Result};

use crate::check_paired;

/// How rows with identical scores are placed on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum RocTies {
    /// All rows sharing a score are one threshold step. Mixed-label ties
    /// contribute a diagonal segment, i.e. count as half a correct ranking.
    #[default]
    Grouped,
    /// Rows are walked one at a time in a stable descending sort, so tied
    /// rows keep their input order. Earlier rows rank higher.
    RowOrder,
}

/// A single point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RocPoint {
    /// Score threshold at which this point is computed.
    pub threshold: f64,
    /// False positive rate: FP / N.
    pub fpr: f64,
    /// True positive rate (recall): TP / P.
    pub tpr: f64,
}

/// ROC curve with AUC.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RocCurve {
    /// Points on the curve, from (0, 0) to (1, 1).
    pub points: Vec<RocPoint>,
    /// Area under the ROC curve (trapezoidal rule).
    pub auc: f64,
}

/// Compute the ROC curve from predicted scores and binary labels.
///
/// The curve starts at (0, 0) with an infinite threshold and ends at (1, 1).
///
/// # Errors
///
/// Returns [`ModevalError::InvalidInput`] if the slices are empty, have
/// different lengths, or contain a non-finite score, and
/// [`ModevalError::Degenerate`] if there are no positive or no negative
/// samples (TPR or FPR would be undefined).
pub fn roc_curve(scores: &[f64], labels: &[bool], ties: RocTies) -> Result<RocCurve> {
    check_paired(scores.len(), labels.len())?;
    if let Some((row, s)) = scores.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        return Err(ModevalError::InvalidInput(format!(
            "row {row}: score {s} is not finite"
        )));
    }

    let total_pos = labels.iter().filter(|&&l| l).count();
    let total_neg = labels.len() - total_pos;
    if total_pos == 0 {
        return Err(ModevalError::Degenerate(
            "AUC-ROC needs at least one positive sample".into(),
        ));
    }
    if total_neg == 0 {
        return Err(ModevalError::Degenerate(
            "AUC-ROC needs at least one negative sample".into(),
        ));
    }

    // Stable sort: equal scores keep their input order.
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    let p = total_pos as f64;
    let n = total_neg as f64;

    let mut points = Vec::with_capacity(order.len() + 1);
    let mut prev = RocPoint {
        threshold: f64::INFINITY,
        fpr: 0.0,
        tpr: 0.0,
    };
    points.push(prev);

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut auc = 0.0;

    let mut i = 0;
    while i < order.len() {
        let threshold = scores[order[i]];
        loop {
            if labels[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
            let same_step = ties == RocTies::Grouped
                && i < order.len()
                && scores[order[i]] == threshold;
            if !same_step {
                break;
            }
        }

        let point = RocPoint {
            threshold,
            fpr: fp as f64 / n,
            tpr: tp as f64 / p,
        };
        auc += (point.fpr - prev.fpr) * (point.tpr + prev.tpr) / 2.0;
        points.push(point);
        prev = point;
    }

    tracing::debug!(
        positives = total_pos,
        negatives = total_neg,
        points = points.len(),
        auc,
        "computed ROC curve"
    );

    Ok(RocCurve { points, auc })
}

/// Compute only the AUC of the ROC curve.
///
/// Shorthand for `roc_curve(scores, labels, ties)?.auc`.
pub fn roc_auc(scores: &[f64], labels: &[bool], ties: RocTies) -> Result<f64> {
    Ok(roc_curve(scores, labels, ties)?.auc)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roc_perfect_auc() {
        let scores = vec![0.9, 0.9, 0.1, 0.1];
        let labels = vec![true, true, false, false];
        for ties in [RocTies::Grouped, RocTies::RowOrder] {
            let roc = roc_curve(&scores, &labels, ties).unwrap();
            assert!((roc.auc - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn roc_inverted_auc() {
        let scores = vec![0.1, 0.2, 0.8, 0.9];
        let labels = vec![true, true, false, false];
        let roc = roc_curve(&scores, &labels, RocTies::Grouped).unwrap();
        assert!(roc.auc.abs() < 1e-12);
    }

    #[test]
    fn roc_known_curve_points() {
        // After sorting: (0.9,T), (0.7,F), (0.5,T), (0.3,F)
        let scores = vec![0.9, 0.7, 0.5, 0.3];
        let labels = vec![true, false, true, false];
        let roc = roc_curve(&scores, &labels, RocTies::Grouped).unwrap();
        let fpr: Vec<f64> = roc.points.iter().map(|p| p.fpr).collect();
        let tpr: Vec<f64> = roc.points.iter().map(|p| p.tpr).collect();
        assert_eq!(fpr, vec![0.0, 0.0, 0.5, 0.5, 1.0]);
        assert_eq!(tpr, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
        assert!((roc.auc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn roc_all_tied_grouped_is_half() {
        let scores = vec![0.5, 0.5, 0.5, 0.5];
        let labels = vec![true, false, true, false];
        let roc = roc_curve(&scores, &labels, RocTies::Grouped).unwrap();
        assert_eq!(roc.points.len(), 2);
        assert!((roc.auc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn roc_all_tied_row_order_follows_input() {
        // Stable walk T, F, T, F: (0,.5) (.5,.5) (.5,1) (1,1)
        let scores = vec![0.5, 0.5, 0.5, 0.5];
        let labels = vec![true, false, true, false];
        let roc = roc_curve(&scores, &labels, RocTies::RowOrder).unwrap();
        assert_eq!(roc.points.len(), 5);
        assert!((roc.auc - 0.75).abs() < 1e-12);

        let flipped = vec![false, true, false, true];
        let roc = roc_curve(&scores, &flipped, RocTies::RowOrder).unwrap();
        assert!((roc.auc - 0.25).abs() < 1e-12);
    }

    #[test]
    fn roc_is_deterministic() {
        let scores = vec![0.3, 0.7, 0.3, 0.7, 0.1];
        let labels = vec![true, false, false, true, false];
        for ties in [RocTies::Grouped, RocTies::RowOrder] {
            let a = roc_curve(&scores, &labels, ties).unwrap();
            let b = roc_curve(&scores, &labels, ties).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn roc_endpoints() {
        let roc = roc_curve(&[0.9, 0.1], &[true, false], RocTies::Grouped).unwrap();
        let first = roc.points[0];
        assert_eq!((first.fpr, first.tpr), (0.0, 0.0));
        assert!(first.threshold.is_infinite());
        let last = roc.points.last().unwrap();
        assert_eq!((last.fpr, last.tpr), (1.0, 1.0));
    }

    #[test]
    fn roc_shorthand_matches_curve() {
        let scores = vec![0.9, 0.7, 0.5, 0.3];
        let labels = vec![true, false, true, false];
        let curve = roc_curve(&scores, &labels, RocTies::Grouped).unwrap().auc;
        let auc = roc_auc(&scores, &labels, RocTies::Grouped).unwrap();
        assert_eq!(curve, auc);
    }

    #[test]
    fn roc_single_class_is_degenerate() {
        let err = roc_curve(&[0.9, 0.8, 0.7], &[true, true, true], RocTies::Grouped).unwrap_err();
        assert!(matches!(err, ModevalError::Degenerate(_)));
        let err = roc_curve(&[0.9, 0.8], &[false, false], RocTies::Grouped).unwrap_err();
        assert!(matches!(err, ModevalError::Degenerate(_)));
    }

    #[test]
    fn roc_invalid_input_errors() {
        assert!(matches!(
            roc_curve(&[], &[], RocTies::Grouped),
            Err(ModevalError::InvalidInput(_))
        ));
        assert!(matches!(
            roc_curve(&[0.5], &[true, false], RocTies::Grouped),
            Err(ModevalError::InvalidInput(_))
        ));
        assert!(matches!(
            roc_curve(&[f64::NAN, 0.5], &[true, false], RocTies::Grouped),
            Err(ModevalError::InvalidInput(_))
        ));
    }
}
