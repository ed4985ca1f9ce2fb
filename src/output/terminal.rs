// Colored terminal output for the dataset overview and model results.
//
// This module handles all terminal-specific formatting: colors, tables,
// metric bars. The pipeline stages delegate their user-facing output here.

use std::path::Path;

use colored::Colorize;

use super::table;
use crate::data::Table;
use crate::error::ModelError;
use crate::pipeline::{ModelFailure, ModelResult, PreparedData};

const PREVIEW_ROWS: usize = 5;
const PREVIEW_CELL_CHARS: usize = 40;

/// Print the dataset overview: preview rows, column types, numeric
/// summaries, missing values, and the label distribution.
pub fn display_dataset_summary(table: &Table, label_column: &str) {
    println!(
        "\n{}",
        format!(
            "=== Dataset ({} rows, {} columns) ===",
            table.len(),
            table.headers.len()
        )
        .bold()
    );

    println!("\n  {}", "First rows:".bold());
    println!("  {}", table.headers.join(" | ").dimmed());
    for row in table.head(PREVIEW_ROWS) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(value) => super::truncate_chars(value, PREVIEW_CELL_CHARS),
                None => "NaN".to_string(),
            })
            .collect();
        println!("  {}", cells.join(" | "));
    }

    println!("\n  {}", "Columns:".bold());
    println!(
        "  {:<24} {:>10}  {:<8}",
        "Column".dimmed(),
        "Non-Null".dimmed(),
        "Dtype".dimmed()
    );
    for info in table.column_info() {
        println!(
            "  {:<24} {:>10}  {:<8}",
            info.name,
            info.non_null,
            info.dtype.as_str()
        );
    }

    let summaries = table.describe();
    if !summaries.is_empty() {
        println!("\n  {}", "Numeric summary:".bold());
        println!(
            "  {:<16} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "".dimmed(),
            "count".dimmed(),
            "mean".dimmed(),
            "std".dimmed(),
            "min".dimmed(),
            "25%".dimmed(),
            "50%".dimmed(),
            "75%".dimmed(),
            "max".dimmed(),
        );
        for s in &summaries {
            println!(
                "  {:<16} {:>8} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                s.column, s.count, s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max
            );
        }
    }

    println!("\n  {}", "Missing values:".bold());
    for (column, count) in table.null_counts() {
        let count_str = if count > 0 {
            count.to_string().yellow().to_string()
        } else {
            count.to_string()
        };
        println!("  {:<24} {:>6}", column, count_str);
    }

    if let Ok(index) = table.column_index(label_column) {
        println!(
            "\n  {}",
            format!("Label distribution ({label_column}):").bold()
        );
        for (value, count) in table.value_counts(index) {
            println!("  {:<24} {:>6}", value, count);
        }
    }
    println!();
}

/// Print partition sizes and the feature count after vectorization.
pub fn display_split(data: &PreparedData) {
    println!(
        "{} {} training rows, {} test rows, {} features",
        "Data split:".bold(),
        data.x_train.nrows(),
        data.x_test.nrows(),
        data.n_features()
    );
}

pub fn display_training_start(name: &str) {
    println!("\n{}", format!("Training {name}...").bold());
}

/// Print one model's weighted metrics followed by its per-class report.
pub fn display_model_metrics(result: &ModelResult) {
    println!("  Precision:     {:.4}", result.precision);
    println!("  Recall:        {:.4}", result.recall);
    println!("  F1 Score:      {:.4}", result.f1);
    println!("  Accuracy:      {:.4}", result.accuracy);
    println!(
        "  Training time: {:.4} seconds",
        result.training_time.as_secs_f64()
    );
    println!("\n  {}", "Classification Report:".bold());
    for line in result.report.to_string().lines() {
        println!("  {line}");
    }
}

pub fn display_model_failure(error: &ModelError) {
    println!("  {} {}", "!!".red().bold(), failure_message(error));
}

/// Print the comparison table exactly as it is written to the CSV.
pub fn display_comparison_table(results: &[ModelResult]) {
    println!("\n{}", "=== Model Comparison ===".bold());
    println!();
    for line in table::format_table(&table::rows(results)).lines() {
        println!("  {line}");
    }
    println!();
}

/// Bar view of every model's precision, recall, F1 and accuracy, scaled to [0, 1].
pub fn display_metric_bars(results: &[ModelResult]) {
    if results.is_empty() {
        return;
    }
    let bar_width: usize = 20;
    let name_width = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    for (label, pick) in bar_metrics() {
        println!("  {}", label.bold());
        for result in results {
            let value = pick(result).clamp(0.0, 1.0);
            let filled = (value * bar_width as f64).round() as usize;
            let bar = format!(
                "[{}{}]",
                "=".repeat(filled),
                " ".repeat(bar_width.saturating_sub(filled))
            );
            println!(
                "  {:<width$} {} {:.4}",
                result.name,
                colorize_bar(bar, value),
                value,
                width = name_width
            );
        }
        println!();
    }
}

pub fn display_saved(what: &str, path: &Path) {
    println!("{} saved to {}", what, path.display().to_string().green());
}

/// Summarize models that were skipped after failing.
pub fn display_failures(failures: &[ModelFailure]) {
    println!(
        "\n  {} {} model(s) failed and are missing from the reports:",
        "!".bright_red(),
        failures.len()
    );
    for failure in failures {
        println!("    {}", failure_message(&failure.error).dimmed());
    }
}

fn bar_metrics() -> [(&'static str, fn(&ModelResult) -> f64); 4] {
    [
        ("Precision", |r: &ModelResult| r.precision),
        ("Recall", |r: &ModelResult| r.recall),
        ("F1 Score", |r: &ModelResult| r.f1),
        ("Accuracy", |r: &ModelResult| r.accuracy),
    ]
}

/// The error text already leads with the model name.
fn failure_message(error: &ModelError) -> String {
    error.to_string()
}

/// Color a metric bar by how strong the score is.
fn colorize_bar(bar: String, value: f64) -> colored::ColoredString {
    if value >= 0.8 {
        bar.bright_green()
    } else if value >= 0.6 {
        bar.bright_yellow()
    } else {
        bar.bright_red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_names_model_once() {
        let error = ModelError::InvalidParams {
            model: "Multilayer Perceptron".to_string(),
            message: "hidden layer widths must be positive".to_string(),
        };
        let message = failure_message(&error);
        assert_eq!(message.matches("Multilayer Perceptron").count(), 1);
        assert!(message.contains("hidden layer widths"));
    }

    #[test]
    fn test_bar_view_covers_all_four_metrics() {
        let labels: Vec<&str> = bar_metrics().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["Precision", "Recall", "F1 Score", "Accuracy"]);
    }
}
