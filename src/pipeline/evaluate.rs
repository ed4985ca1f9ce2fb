// Trainer/evaluator stage: fit every configured model on the same training
// partition, time the fit, and score its predictions on the test partition.
//
// Models are independent. A failing model is recorded and skipped when
// `keep_going` is set, so one non-converging model does not throw away the
// results of the others.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::prepare::PreparedData;
use crate::error::{ModelError, PipelineError};
use crate::metrics::{ClassificationReport, ConfusionMatrix};
use crate::models::ModelConfig;
use crate::output::terminal;

/// Scores for one evaluated model.
#[derive(Debug, Clone)]
pub struct ModelResult {
    pub name: String,
    /// Support-weighted precision
    pub precision: f64,
    /// Support-weighted recall
    pub recall: f64,
    /// Support-weighted F1
    pub f1: f64,
    pub accuracy: f64,
    /// Wall-clock time spent in `fit`
    pub training_time: Duration,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
}

/// A model that could not be trained or evaluated.
#[derive(Debug)]
pub struct ModelFailure {
    pub name: String,
    pub error: ModelError,
}

/// Outcome of the evaluation loop, in model order.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub results: Vec<ModelResult>,
    pub failures: Vec<ModelFailure>,
}

impl Evaluation {
    /// Confusion matrix per model name, in evaluation order.
    pub fn confusion_matrices(&self) -> Vec<(&str, &ConfusionMatrix)> {
        self.results
            .iter()
            .map(|r| (r.name.as_str(), &r.confusion))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ModelResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Fit and score one model configuration.
pub fn evaluate_model(model: &ModelConfig, data: &PreparedData) -> Result<ModelResult, ModelError> {
    let mut classifier = model.build();
    let n_classes = data.class_names.len();

    let start = Instant::now();
    classifier.fit(&data.x_train, &data.y_train, n_classes)?;
    let training_time = start.elapsed();

    let predicted = classifier.predict(&data.x_test)?;
    if predicted.len() != data.y_test.len() {
        return Err(ModelError::predict(
            classifier.name(),
            format!(
                "{} predictions for {} test rows",
                predicted.len(),
                data.y_test.len()
            ),
        ));
    }

    let confusion = ConfusionMatrix::from_labels(&data.y_test, &predicted, n_classes);
    let scores = confusion.weighted();
    let report = ClassificationReport::new(&confusion, &data.class_names);

    Ok(ModelResult {
        name: classifier.name().to_string(),
        precision: scores.precision,
        recall: scores.recall,
        f1: scores.f1,
        accuracy: scores.accuracy,
        training_time,
        confusion,
        report,
    })
}

/// Train and evaluate every model in order.
///
/// With `keep_going` a failed model is logged and skipped; otherwise the
/// first failure aborts the run. Errors when no model succeeds.
pub fn train_and_evaluate(
    models: &[ModelConfig],
    data: &PreparedData,
    keep_going: bool,
) -> Result<Evaluation, PipelineError> {
    let mut evaluation = Evaluation::default();

    for model in models {
        terminal::display_training_start(model.name());

        match evaluate_model(model, data) {
            Ok(result) => {
                info!(
                    model = %result.name,
                    accuracy = result.accuracy,
                    f1 = result.f1,
                    seconds = result.training_time.as_secs_f64(),
                    "Model evaluated"
                );
                terminal::display_model_metrics(&result);
                evaluation.results.push(result);
            }
            Err(error) if keep_going => {
                warn!(model = model.name(), error = %error, "Model failed, continuing with the rest");
                terminal::display_model_failure(&error);
                evaluation.failures.push(ModelFailure {
                    name: model.name().to_string(),
                    error,
                });
            }
            Err(error) => return Err(error.into()),
        }
    }

    if evaluation.results.is_empty() && !models.is_empty() {
        return Err(PipelineError::AllModelsFailed(models.len()));
    }

    Ok(evaluation)
}
