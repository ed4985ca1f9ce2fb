// Linear-kernel support-vector machine, backed by linfa-svm.
//
// linfa's SVM classifier is binary: class 1 is trained as the positive
// side of the margin, class 0 as the negative side.

use linfa::prelude::*;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};

use super::traits::{check_fit_input, Classifier};
use crate::error::ModelError;

pub const NAME: &str = "Support Vector Machine";

#[derive(Debug, Clone, PartialEq)]
pub struct SvmParams {
    /// Soft-margin penalty applied to both classes (default 1.0)
    pub c: f64,
    /// Solver stopping tolerance (default 1e-3)
    pub eps: f64,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self { c: 1.0, eps: 1e-3 }
    }
}

pub struct SvmClassifier {
    params: SvmParams,
    model: Option<Svm<f64, bool>>,
}

impl SvmClassifier {
    pub fn new(params: SvmParams) -> Self {
        Self {
            params,
            model: None,
        }
    }
}

impl Classifier for SvmClassifier {
    fn name(&self) -> &str {
        NAME
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>, n_classes: usize) -> Result<(), ModelError> {
        check_fit_input(NAME, x, y, n_classes)?;
        if n_classes != 2 {
            return Err(ModelError::InvalidParams {
                model: NAME.to_string(),
                message: format!("binary classifier given {n_classes} classes"),
            });
        }

        let targets: Array1<bool> = y.mapv(|label| label == 1);
        let dataset = Dataset::new(x.clone(), targets);

        let model = Svm::<f64, bool>::params()
            .pos_neg_weights(self.params.c, self.params.c)
            .eps(self.params.eps)
            .linear_kernel()
            .fit(&dataset)
            .map_err(|e| ModelError::fit(NAME, e))?;

        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>, ModelError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| ModelError::NotFitted(NAME.to_string()))?;
        let predicted: Array1<bool> = model.predict(x);
        Ok(predicted.mapv(usize::from))
    }
}
