//! Probability types for classifier outputs.
//!
//! [`ProbVector`] holds one row of a multi-class model's output: a length-checked
//! sequence of non-negative class scores. [`clamp_probability`] is the
//! numerical-stability contract shared by every log-based loss.

use crate::{ModevalError, Result};

/// Lower clamp bound applied before taking `ln(p)`; the upper bound is `1 - PROB_EPSILON`.
pub const PROB_EPSILON: f64 = 1e-9;

/// Clamp `p` into `[PROB_EPSILON, 1 - PROB_EPSILON]` so that `ln(p)` and
/// `ln(1 - p)` are both finite.
#[inline]
pub fn clamp_probability(p: f64) -> f64 {
    p.min(1.0 - PROB_EPSILON).max(PROB_EPSILON)
}

/// Predicted class scores for a single row, one entry per class.
///
/// Entries are finite and non-negative. They are not required to sum to 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ProbVector(Vec<f64>);

impl ProbVector {
    /// Create a probability vector from raw class scores.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` is empty or contains a negative or
    /// non-finite entry.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ModevalError::InvalidInput(
                "probability vector must not be empty".into(),
            ));
        }
        if let Some((i, &v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ModevalError::InvalidInput(format!(
                "probability for class {i} is {v}; expected a finite, non-negative value"
            )));
        }
        Ok(Self(values))
    }

    /// Create a probability vector that must cover exactly `n_classes` classes.
    ///
    /// # Errors
    ///
    /// Returns an error if the length differs from `n_classes`, or for any of
    /// the reasons in [`ProbVector::new`].
    pub fn with_classes(values: Vec<f64>, n_classes: usize) -> Result<Self> {
        if values.len() != n_classes {
            return Err(ModevalError::InvalidInput(format!(
                "expected {n_classes} class probabilities, got {}",
                values.len()
            )));
        }
        Self::new(values)
    }

    /// Number of classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Score for `class`, if it exists.
    #[inline]
    pub fn get(&self, class: usize) -> Option<f64> {
        self.0.get(class).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for ProbVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for ProbVector {
    type Error = ModevalError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_probability(0.0), PROB_EPSILON);
        assert_eq!(clamp_probability(1.0), 1.0 - PROB_EPSILON);
        assert_eq!(clamp_probability(0.25), 0.25);
        assert!(clamp_probability(0.0).ln().is_finite());
        assert!((1.0 - clamp_probability(1.0)).ln().is_finite());
    }

    #[test]
    fn new_accepts_unnormalized() {
        let v = ProbVector::new(vec![0.5, 0.9, 0.0]).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.get(1), Some(0.9));
        assert_eq!(v.get(3), None);
    }

    #[test]
    fn new_rejects_empty() {
        assert!(ProbVector::new(vec![]).is_err());
    }

    #[test]
    fn new_rejects_negative_and_nan() {
        assert!(ProbVector::new(vec![0.5, -0.1]).is_err());
        assert!(ProbVector::new(vec![f64::NAN, 0.1]).is_err());
        assert!(ProbVector::new(vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn with_classes_checks_width() {
        assert!(ProbVector::with_classes(vec![0.2, 0.8], 2).is_ok());
        assert!(ProbVector::with_classes(vec![0.2, 0.8], 5).is_err());
    }
}
