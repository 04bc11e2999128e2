//! Error metrics for single-variable continuous regression.

use modeval_core::{ModevalError, Result};

use crate::check_paired;

/// Denominator used when averaging MARE over rows whose actual value is non-zero.
///
/// Rows with `actual == 0` never contribute to the sum. The policies differ only
/// in what the sum is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum MarePolicy {
    /// Divide by the total row count, including skipped rows.
    #[default]
    AllRows,
    /// Divide by the number of rows actually summed.
    NonZeroRows,
}

/// Mean squared error.
///
/// # Errors
///
/// Returns an error if the slices are empty or have different lengths.
pub fn mse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_paired(actual.len(), predicted.len())?;
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let err = a - p;
            err * err
        })
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Mean absolute error.
///
/// # Errors
///
/// Returns an error if the slices are empty or have different lengths.
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_paired(actual.len(), predicted.len())?;
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Mean absolute relative error, as a percentage: `mean(|(a - p) / a|) × 100`.
///
/// Rows with `actual == 0` are skipped; `policy` decides whether they still
/// count towards the denominator.
///
/// # Errors
///
/// Returns [`ModevalError::InvalidInput`] if the slices are empty or have
/// different lengths, and [`ModevalError::Degenerate`] under
/// [`MarePolicy::NonZeroRows`] when every actual value is zero.
pub fn mare(actual: &[f64], predicted: &[f64], policy: MarePolicy) -> Result<f64> {
    check_paired(actual.len(), predicted.len())?;

    let mut sum = 0.0;
    let mut included = 0usize;
    for (&a, &p) in actual.iter().zip(predicted) {
        if a == 0.0 {
            continue;
        }
        sum += ((a - p) / a).abs();
        included += 1;
    }

    let skipped = actual.len() - included;
    if skipped > 0 {
        tracing::warn!(skipped, ?policy, "MARE skipped rows with a zero actual value");
    }

    let denom = match policy {
        MarePolicy::AllRows => actual.len(),
        MarePolicy::NonZeroRows if included == 0 => {
            return Err(ModevalError::Degenerate(
                "MARE is undefined: every actual value is zero".into(),
            ))
        }
        MarePolicy::NonZeroRows => included,
    };
    Ok(sum / denom as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_are_zero() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(mse(&y, &y).unwrap(), 0.0);
        assert_eq!(mae(&y, &y).unwrap(), 0.0);
        assert_eq!(mare(&y, &y, MarePolicy::AllRows).unwrap(), 0.0);
        assert_eq!(mare(&y, &y, MarePolicy::NonZeroRows).unwrap(), 0.0);
    }

    #[test]
    fn known_values() {
        let actual = [1.0, 2.0, 4.0];
        let predicted = [2.0, 2.0, 2.0];
        // errors: -1, 0, 2
        assert!((mse(&actual, &predicted).unwrap() - 5.0 / 3.0).abs() < 1e-12);
        assert!((mae(&actual, &predicted).unwrap() - 1.0).abs() < 1e-12);
        // relative: 1, 0, 0.5
        let m = mare(&actual, &predicted, MarePolicy::AllRows).unwrap();
        assert!((m - 50.0).abs() < 1e-12);
    }

    #[test]
    fn mare_negative_actual_is_absolute() {
        let m = mare(&[-2.0], &[-1.0], MarePolicy::AllRows).unwrap();
        assert!((m - 50.0).abs() < 1e-12);
    }

    #[test]
    fn mare_skips_zero_actuals() {
        let actual = [0.0, 2.0];
        let predicted = [5.0, 3.0];
        // Only row 1 contributes |2 - 3| / 2 = 0.5
        let all = mare(&actual, &predicted, MarePolicy::AllRows).unwrap();
        assert!((all - 25.0).abs() < 1e-12);
        let non_zero = mare(&actual, &predicted, MarePolicy::NonZeroRows).unwrap();
        assert!((non_zero - 50.0).abs() < 1e-12);
    }

    #[test]
    fn mare_all_zero_actuals() {
        let actual = [0.0, 0.0];
        let predicted = [1.0, 2.0];
        assert_eq!(mare(&actual, &predicted, MarePolicy::AllRows).unwrap(), 0.0);
        assert!(matches!(
            mare(&actual, &predicted, MarePolicy::NonZeroRows),
            Err(ModevalError::Degenerate(_))
        ));
    }

    #[test]
    fn empty_and_mismatch_errors() {
        assert!(mse(&[], &[]).is_err());
        assert!(mae(&[1.0], &[1.0, 2.0]).is_err());
        assert!(matches!(
            mare(&[], &[], MarePolicy::NonZeroRows),
            Err(ModevalError::InvalidInput(_))
        ));
    }
}
