// Multinomial naive Bayes, backed by linfa-bayes.
//
// TF-IDF weights are non-negative, which is all the multinomial event
// model needs; they stand in for fractional term counts.

use linfa::prelude::*;
use linfa_bayes::MultinomialNb;
use ndarray::{Array1, Array2};

use super::traits::{check_fit_input, Classifier};
use crate::error::ModelError;

pub const NAME: &str = "Naive Bayes";

#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayesParams {
    /// Additive (Laplace) smoothing (default 1.0)
    pub alpha: f64,
}

impl Default for NaiveBayesParams {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

pub struct NaiveBayesClassifier {
    params: NaiveBayesParams,
    model: Option<MultinomialNb<f64, usize>>,
}

impl NaiveBayesClassifier {
    pub fn new(params: NaiveBayesParams) -> Self {
        Self {
            params,
            model: None,
        }
    }
}

impl Classifier for NaiveBayesClassifier {
    fn name(&self) -> &str {
        NAME
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>, n_classes: usize) -> Result<(), ModelError> {
        check_fit_input(NAME, x, y, n_classes)?;
        if x.iter().any(|&v| v < 0.0) {
            return Err(ModelError::InvalidParams {
                model: NAME.to_string(),
                message: "multinomial naive Bayes needs non-negative features".to_string(),
            });
        }

        let dataset = Dataset::new(x.clone(), y.clone());
        let model = MultinomialNb::<f64, usize>::params()
            .alpha(self.params.alpha)
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
        Ok(model.predict(x))
    }
}
