//! Turning model scores into hard class labels.

use modeval_core::{ModevalError, ProbVector, Result};

/// Default decision threshold for binary classifiers.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Index of the largest score in `probs`.
///
/// Ties resolve to the lowest index.
///
/// # Errors
///
/// Returns an error if `probs` is empty.
pub fn argmax_class(probs: &[f64]) -> Result<usize> {
    let (first, rest) = probs
        .split_first()
        .ok_or_else(|| ModevalError::InvalidInput("argmax of an empty score vector".into()))?;

    let mut best = 0;
    let mut best_score = *first;
    for (i, &p) in rest.iter().enumerate() {
        if p > best_score {
            best_score = p;
            best = i + 1;
        }
    }
    Ok(best)
}

/// `1` if `prob >= threshold`, else `0`. The boundary belongs to the positive class.
#[inline]
pub fn threshold_class(prob: f64, threshold: f64) -> usize {
    usize::from(prob >= threshold)
}

/// Argmax label for every row.
pub fn predicted_classes(predicted: &[ProbVector]) -> Result<Vec<usize>> {
    predicted
        .iter()
        .map(|v| argmax_class(v.as_slice()))
        .collect()
}

/// Thresholded label for every row.
pub fn thresholded_classes(predicted: &[f64], threshold: f64) -> Vec<usize> {
    predicted
        .iter()
        .map(|&p| threshold_class(p, threshold))
        .collect()
}

/// Check that every label is `0` or `1` and convert to booleans (`1` is positive).
///
/// # Errors
///
/// Returns an error naming the first row whose label is neither 0 nor 1.
pub fn binary_labels(actual: &[usize]) -> Result<Vec<bool>> {
    actual
        .iter()
        .enumerate()
        .map(|(i, &y)| match y {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ModevalError::InvalidInput(format!(
                "row {i}: binary label must be 0 or 1, got {other}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_largest() {
        assert_eq!(argmax_class(&[0.1, 0.7, 0.2]).unwrap(), 1);
        assert_eq!(argmax_class(&[0.9]).unwrap(), 0);
    }

    #[test]
    fn argmax_ties_go_to_lowest_index() {
        assert_eq!(argmax_class(&[0.3, 0.3, 0.1]).unwrap(), 0);
        assert_eq!(argmax_class(&[0.1, 0.4, 0.4, 0.4]).unwrap(), 1);
        assert_eq!(argmax_class(&[0.0, 0.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn argmax_empty_error() {
        assert!(argmax_class(&[]).is_err());
    }

    #[test]
    fn threshold_boundary_is_positive() {
        assert_eq!(threshold_class(0.5, DEFAULT_THRESHOLD), 1);
        assert_eq!(threshold_class(0.4999, DEFAULT_THRESHOLD), 0);
        assert_eq!(threshold_class(1.0, DEFAULT_THRESHOLD), 1);
        assert_eq!(threshold_class(0.0, DEFAULT_THRESHOLD), 0);
        assert_eq!(threshold_class(0.7, 0.8), 0);
    }

    #[test]
    fn predicted_classes_per_row() {
        let rows = vec![
            ProbVector::new(vec![0.1, 0.9]).unwrap(),
            ProbVector::new(vec![0.6, 0.4]).unwrap(),
        ];
        assert_eq!(predicted_classes(&rows).unwrap(), vec![1, 0]);
    }

    #[test]
    fn thresholded_classes_per_row() {
        assert_eq!(thresholded_classes(&[0.2, 0.5, 0.8], 0.5), vec![0, 1, 1]);
    }

    #[test]
    fn binary_labels_validation() {
        assert_eq!(binary_labels(&[0, 1, 1]).unwrap(), vec![false, true, true]);
        let err = binary_labels(&[0, 2]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
