// Model comparison table: the CSV written to disk and its text rendering.
//
// Numbers are formatted to four decimals before they reach either form, so
// the file and the screen always agree.

use std::path::Path;

use serde::Serialize;

use crate::error::ReportError;
use crate::pipeline::ModelResult;

pub const HEADERS: [&str; 6] = [
    "Algorithm",
    "Precision",
    "Recall",
    "F1 Score",
    "Accuracy",
    "Training Time (s)",
];

/// One row of the comparison table, every metric pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Algorithm")]
    pub algorithm: String,
    #[serde(rename = "Precision")]
    pub precision: String,
    #[serde(rename = "Recall")]
    pub recall: String,
    #[serde(rename = "F1 Score")]
    pub f1: String,
    #[serde(rename = "Accuracy")]
    pub accuracy: String,
    #[serde(rename = "Training Time (s)")]
    pub training_time: String,
}

impl From<&ModelResult> for ResultRow {
    fn from(result: &ModelResult) -> Self {
        Self {
            algorithm: result.name.clone(),
            precision: format!("{:.4}", result.precision),
            recall: format!("{:.4}", result.recall),
            f1: format!("{:.4}", result.f1),
            accuracy: format!("{:.4}", result.accuracy),
            training_time: format!("{:.4}", result.training_time.as_secs_f64()),
        }
    }
}

impl ResultRow {
    fn cells(&self) -> [&str; 6] {
        [
            &self.algorithm,
            &self.precision,
            &self.recall,
            &self.f1,
            &self.accuracy,
            &self.training_time,
        ]
    }
}

pub fn rows(results: &[ModelResult]) -> Vec<ResultRow> {
    results.iter().map(ResultRow::from).collect()
}

/// Write the comparison table as CSV with a header row.
pub fn write_csv(path: &Path, results: &[ModelResult]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    if results.is_empty() {
        wtr.write_record(HEADERS)?;
    }
    for row in rows(results) {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Render the table as right-aligned text columns.
pub fn format_table(rows: &[ResultRow]) -> String {
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: [&str; 6]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![render(HEADERS)];
    lines.extend(rows.iter().map(|r| render(r.cells())));
    lines.join("\n")
}
