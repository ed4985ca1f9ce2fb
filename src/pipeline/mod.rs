// Evaluation pipeline: load -> prepare -> train/evaluate -> report.
//
// Each stage consumes the full output of the previous one. The first error
// stops the run, except per-model failures, which `evaluate` can absorb.

pub mod evaluate;
pub mod prepare;
pub mod report;

use std::path::PathBuf;

use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::data::{self, LabeledDataset};
use crate::error::PipelineError;
use crate::output::terminal;

pub use evaluate::{evaluate_model, train_and_evaluate, Evaluation, ModelFailure, ModelResult};
pub use prepare::{prepare, PreparedData};

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub evaluation: Evaluation,
    pub results_path: PathBuf,
    pub metrics_chart_path: PathBuf,
    pub confusion_chart_path: PathBuf,
}

/// Run the whole comparison described by `config`.
pub fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    println!("{}", "Loading dataset...".bold());
    let table = data::load(&config.data_path)?;
    terminal::display_dataset_summary(&table, &config.label_column);

    let dataset = LabeledDataset::from_table(
        &table,
        &config.text_column,
        &config.label_column,
        config.positive_label.as_deref(),
    )?;

    let prepared = prepare(&dataset, &config.vectorizer, &config.split)?;
    terminal::display_split(&prepared);

    let evaluation = train_and_evaluate(&config.models, &prepared, config.keep_going)?;

    let summary = report::write_reports(evaluation, config)?;
    info!(
        models = summary.evaluation.results.len(),
        failed = summary.evaluation.failures.len(),
        "Pipeline finished"
    );
    Ok(summary)
}
