// Classifier trait: the seam every compared model plugs into.
//
// The evaluation loop only sees this trait, so adding a fifth model means
// one new implementation and one new ModelConfig variant.

use ndarray::{Array1, Array2};

use crate::error::ModelError;

/// A supervised classifier over dense feature rows and class-index labels.
pub trait Classifier {
    /// Display name used in logs, the results table and chart titles.
    fn name(&self) -> &str;

    /// Learn from `x` (one row per sample) and `y` (class indices in `0..n_classes`).
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>, n_classes: usize) -> Result<(), ModelError>;

    /// Predict a class index for every row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>, ModelError>;
}

/// Shared input checks for `fit`.
pub(crate) fn check_fit_input(
    model: &str,
    x: &Array2<f64>,
    y: &Array1<usize>,
    n_classes: usize,
) -> Result<(), ModelError> {
    let invalid = |message: String| ModelError::InvalidParams {
        model: model.to_string(),
        message,
    };

    if x.nrows() == 0 {
        return Err(invalid("no training rows".to_string()));
    }
    if x.nrows() != y.len() {
        return Err(invalid(format!(
            "{} feature rows but {} labels",
            x.nrows(),
            y.len()
        )));
    }
    if let Some(&bad) = y.iter().find(|&&label| label >= n_classes) {
        return Err(invalid(format!(
            "label {bad} outside the {n_classes} known classes"
        )));
    }
    Ok(())
}
