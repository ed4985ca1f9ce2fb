// Error taxonomy for the evaluation pipeline.
//
// One enum per stage so a caller can tell a missing dataset apart from a
// model that failed to converge. PipelineError wraps them for the top level.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the table or turning it into a labeled dataset.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("File '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' has {count} missing value(s), first at row {first_row}")]
    MissingValues {
        column: String,
        count: usize,
        first_row: usize,
    },

    #[error("Expected exactly 2 label classes, found {}: [{}]", found.len(), found.join(", "))]
    NonBinaryLabels { found: Vec<String> },

    #[error("Positive label '{label}' does not occur in the label column")]
    UnknownPositiveLabel { label: String },

    #[error("Invalid train/test split: {0}")]
    InvalidSplit(String),
}

/// Failures while building the TF-IDF feature matrix.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("No documents to vectorize")]
    NoDocuments,

    #[error("Empty vocabulary; documents may only contain stop words or single characters")]
    EmptyVocabulary,

    #[error("Vectorizer used before fit")]
    NotFitted,
}

/// Failures while fitting or running a single classifier.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{model}: invalid parameters: {message}")]
    InvalidParams { model: String, message: String },

    #[error("{model}: training failed: {message}")]
    Fit { model: String, message: String },

    #[error("{model}: prediction failed: {message}")]
    Predict { model: String, message: String },

    #[error("{0}: predict called before fit")]
    NotFitted(String),
}

impl ModelError {
    pub fn fit(model: &str, err: impl std::fmt::Display) -> Self {
        Self::Fit {
            model: model.to_string(),
            message: err.to_string(),
        }
    }

    pub fn predict(model: &str, err: impl std::fmt::Display) -> Self {
        Self::Predict {
            model: model.to_string(),
            message: err.to_string(),
        }
    }
}

/// Failures while writing the results table or rendering charts.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write results table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to render '{}': {message}", path.display())]
    Render { path: PathBuf, message: String },
}

/// Top-level error for a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Features(#[from] FeatureError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("All {0} models failed to train")]
    AllModelsFailed(usize),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl PipelineError {
    /// True when the run stopped because the input file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Data(DataError::NotFound(_)))
    }
}
