// Labeled text dataset: the table narrowed to (text, class index) pairs.
//
// Label encoding is where swapped classes would silently corrupt every
// metric, so the raw -> index mapping is explicit and logged.

use ndarray::Array1;
use tracing::info;

use super::table::Table;
use crate::error::DataError;

/// Texts with encoded labels. `labels[i]` indexes into `classes`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    pub texts: Vec<String>,
    pub labels: Array1<usize>,
    /// Raw label values; position = class index. Index 1 is the positive class.
    pub classes: Vec<String>,
}

impl LabeledDataset {
    /// Extract the text and label columns from a loaded table.
    ///
    /// Fails on a missing column, any null text or label, or a label column
    /// that does not hold exactly two distinct values.
    pub fn from_table(
        table: &Table,
        text_column: &str,
        label_column: &str,
        positive_label: Option<&str>,
    ) -> Result<Self, DataError> {
        let text_idx = table.column_index(text_column)?;
        let label_idx = table.column_index(label_column)?;

        let texts = collect_required(table, text_idx, text_column)?;
        let raw_labels = collect_required(table, label_idx, label_column)?;
        let raw_labels: Vec<String> = raw_labels.into_iter().map(|l| l.trim().to_string()).collect();

        let classes = encode_classes(&raw_labels, positive_label)?;
        let labels: Array1<usize> = raw_labels
            .iter()
            .map(|raw| {
                // encode_classes saw every raw value, so the lookup cannot miss
                classes.iter().position(|c| c == raw).unwrap_or(0)
            })
            .collect();

        info!(
            negative = %classes[0],
            positive = %classes[1],
            "Label classes encoded (negative = 0, positive = 1)"
        );

        Ok(Self {
            texts,
            labels,
            classes,
        })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Number of rows in each class, indexed by class.
    pub fn class_counts(&self) -> Vec<usize> {
        class_counts(&self.labels, self.n_classes())
    }
}

/// Count occurrences of each class index in `0..n_classes`.
pub fn class_counts(labels: &Array1<usize>, n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &label in labels {
        if label < n_classes {
            counts[label] += 1;
        }
    }
    counts
}

fn collect_required(table: &Table, index: usize, column: &str) -> Result<Vec<String>, DataError> {
    let mut values = Vec::with_capacity(table.len());
    let mut missing = 0usize;
    let mut first_missing = None;

    for (row, cell) in table.column(index).enumerate() {
        match cell {
            Some(value) => values.push(value.to_string()),
            None => {
                missing += 1;
                first_missing.get_or_insert(row);
            }
        }
    }

    if let Some(first_row) = first_missing {
        return Err(DataError::MissingValues {
            column: column.to_string(),
            count: missing,
            first_row,
        });
    }
    Ok(values)
}

/// Sorted distinct labels (numeric order when every label is an integer),
/// optionally reordered so `positive_label` is class 1.
fn encode_classes(raw: &[String], positive_label: Option<&str>) -> Result<Vec<String>, DataError> {
    let mut classes: Vec<String> = raw.to_vec();
    classes.sort();
    classes.dedup();

    let all_integers = classes.iter().all(|c| c.parse::<i64>().is_ok());
    if all_integers {
        classes.sort_by_key(|c| c.parse::<i64>().unwrap_or_default());
    }

    if classes.len() != 2 {
        return Err(DataError::NonBinaryLabels { found: classes });
    }

    if let Some(positive) = positive_label {
        let pos = classes
            .iter()
            .position(|c| c == positive)
            .ok_or_else(|| DataError::UnknownPositiveLabel {
                label: positive.to_string(),
            })?;
        if pos == 0 {
            classes.swap(0, 1);
        }
    }

    Ok(classes)
}
