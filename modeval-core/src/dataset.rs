//! Row-aligned evaluation datasets.

use crate::{ModevalError, Result};

/// `N` paired records `(actual[i], predicted[i])`, aligned by position.
///
/// Construction guarantees both columns have the same length. Emptiness is
/// allowed here and rejected by the metrics that divide by `N`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<A, P> {
    actual: Vec<A>,
    predicted: Vec<P>,
}

impl<A, P> Dataset<A, P> {
    /// Pair up ground truth and model output.
    ///
    /// # Errors
    ///
    /// Returns an error if the two columns have different lengths.
    pub fn new(actual: Vec<A>, predicted: Vec<P>) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(ModevalError::InvalidInput(format!(
                "actual length {} != predicted length {}",
                actual.len(),
                predicted.len()
            )));
        }
        Ok(Self { actual, predicted })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }

    /// Ground-truth column.
    pub fn actual(&self) -> &[A] {
        &self.actual
    }

    /// Model-output column.
    pub fn predicted(&self) -> &[P] {
        &self.predicted
    }
}
