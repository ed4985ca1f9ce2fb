// Reporter stage: comparison table on screen and on disk, then both charts.

use tracing::info;

use super::evaluate::Evaluation;
use super::RunSummary;
use crate::config::Config;
use crate::error::{PipelineError, ReportError};
use crate::output::{charts, table, terminal};

/// Print the comparison, write the results CSV, and render both charts.
pub fn write_reports(evaluation: Evaluation, config: &Config) -> Result<RunSummary, PipelineError> {
    std::fs::create_dir_all(&config.output_dir).map_err(|source| ReportError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    terminal::display_comparison_table(&evaluation.results);
    terminal::display_metric_bars(&evaluation.results);

    let results_path = config.results_path();
    table::write_csv(&results_path, &evaluation.results)?;
    terminal::display_saved("Model comparison table", &results_path);

    let metrics_chart_path = config.metrics_chart_path();
    charts::render_metric_comparison(&metrics_chart_path, &evaluation.results)?;
    terminal::display_saved("Metric comparison chart", &metrics_chart_path);

    let confusion_chart_path = config.confusion_chart_path();
    charts::render_confusion_matrices(&confusion_chart_path, &evaluation.results)?;
    terminal::display_saved("Confusion matrix chart", &confusion_chart_path);

    if !evaluation.failures.is_empty() {
        terminal::display_failures(&evaluation.failures);
    }

    info!(
        results = %results_path.display(),
        metrics_chart = %metrics_chart_path.display(),
        confusion_chart = %confusion_chart_path.display(),
        "Reports written"
    );

    Ok(RunSummary {
        evaluation,
        results_path,
        metrics_chart_path,
        confusion_chart_path,
    })
}
