// Raw tabular dataset: the loader's output.
//
// Cells are kept as optional strings (empty = null) so the diagnostics can
// report nulls and infer column types the same way a dataframe would,
// before anything is committed to a text/label shape.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::DataError;

/// An in-memory CSV table: header names plus rows of nullable cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Inferred storage type of a column, named after the dataframe dtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Text,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int64",
            ColumnType::Float => "float64",
            ColumnType::Text => "object",
        }
    }
}

/// Per-column summary for the "column info" diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: ColumnType,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN for a single value
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Read a CSV file with a header row into a [`Table`].
pub fn load(path: &Path) -> Result<Table, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = Table::from_reader(file)?;

    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "Dataset loaded"
    );

    Ok(table)
}

impl Table {
    /// Parse CSV from any reader. Ragged rows are a parse error.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// All cells of one column, in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|c| c.as_deref()))
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Vec<Option<String>>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Null count per column, in header order.
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), self.column(i).filter(|c| c.is_none()).count()))
            .collect()
    }

    /// Name, non-null count and inferred type of every column.
    pub fn column_info(&self) -> Vec<ColumnInfo> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<&str> = self.column(i).flatten().collect();
                ColumnInfo {
                    name: name.clone(),
                    non_null: values.len(),
                    dtype: infer_type(&values),
                }
            })
            .collect()
    }

    /// Summary statistics for every numeric column.
    /// Text columns are skipped, like a dataframe `describe()`.
    pub fn describe(&self) -> Vec<NumericSummary> {
        let mut summaries = Vec::new();
        for (i, name) in self.headers.iter().enumerate() {
            let values: Vec<&str> = self.column(i).flatten().collect();
            if values.is_empty() || infer_type(&values) == ColumnType::Text {
                continue;
            }
            let mut numbers: Vec<f64> = values
                .iter()
                .filter_map(|v| v.trim().parse::<f64>().ok())
                .collect();
            numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            summaries.push(summarize(name, &numbers));
        }
        summaries
    }

    /// Occurrences of each distinct non-null value, most frequent first.
    /// Ties are ordered by value so the output is stable.
    pub fn value_counts(&self, index: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for cell in self.column(index).flatten() {
            *counts.entry(cell).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

fn infer_type(values: &[&str]) -> ColumnType {
    if values.is_empty() {
        return ColumnType::Text;
    }
    if values.iter().all(|v| v.trim().parse::<i64>().is_ok()) {
        ColumnType::Int
    } else if values.iter().all(|v| v.trim().parse::<f64>().is_ok()) {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

/// `sorted` must be non-empty and ascending.
fn summarize(column: &str, sorted: &[f64]) -> NumericSummary {
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let var = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    } else {
        f64::NAN
    };

    NumericSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q75: quantile(sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear interpolation between the two closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&sorted, 1.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_infer_type() {
        assert_eq!(infer_type(&["1", "0", "1"]), ColumnType::Int);
        assert_eq!(infer_type(&["1.5", "0"]), ColumnType::Float);
        assert_eq!(infer_type(&["hoax", "1"]), ColumnType::Text);
    }
}
