//! Cross-entropy losses for classifier outputs.
//!
//! Every probability is passed through [`clamp_probability`] before its
//! logarithm is taken, so a prediction of exactly 0 or 1 yields a large but
//! finite loss instead of infinity.

use modeval_core::{clamp_probability, ModevalError, ProbVector, Result};

use crate::check_paired;

/// Mean negative log-probability assigned to the true class.
///
/// For each row, `p = predicted[i][actual[i]]` is clamped and `-ln(p)` is
/// accumulated; the result is the mean over all rows.
///
/// # Errors
///
/// Returns an error if the inputs are empty, have different lengths, or a
/// label has no corresponding entry in its probability vector.
pub fn categorical_cross_entropy(actual: &[usize], predicted: &[ProbVector]) -> Result<f64> {
    check_paired(actual.len(), predicted.len())?;

    let mut sum = 0.0;
    for (row, (&y, probs)) in actual.iter().zip(predicted).enumerate() {
        let p = probs.get(y).ok_or_else(|| {
            ModevalError::InvalidInput(format!(
                "row {row}: class {y} outside [0, {})",
                probs.len()
            ))
        })?;
        sum -= clamp_probability(p).ln();
    }
    Ok(sum / actual.len() as f64)
}

/// Binary cross-entropy: `-mean(y·ln(p) + (1-y)·ln(1-p))`.
///
/// `actual` holds 0/1 labels; `predicted` holds the probability of class 1.
///
/// # Errors
///
/// Returns an error if the inputs are empty or have different lengths, a
/// label is not 0 or 1, or a probability is not a finite value in `[0, 1]`.
pub fn binary_cross_entropy(actual: &[usize], predicted: &[f64]) -> Result<f64> {
    check_paired(actual.len(), predicted.len())?;
    check_probabilities(predicted)?;

    let mut sum = 0.0;
    for (row, (&y, &p)) in actual.iter().zip(predicted).enumerate() {
        let p = clamp_probability(p);
        sum += match y {
            1 => p.ln(),
            0 => (1.0 - p).ln(),
            other => {
                return Err(ModevalError::InvalidInput(format!(
                    "row {row}: binary label must be 0 or 1, got {other}"
                )))
            }
        };
    }
    Ok(-sum / actual.len() as f64)
}

/// Every entry must be a finite probability in `[0, 1]`.
fn check_probabilities(predicted: &[f64]) -> Result<()> {
    match predicted
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        Some((row, p)) => Err(ModevalError::InvalidInput(format!(
            "row {row}: probability {p} outside [0, 1]"
        ))),
        None => Ok(()),
    }
}
