// Evaluation metrics: confusion matrix, weighted scores, classification report.

pub mod confusion;
pub mod report;

pub use confusion::{ClassScores, ConfusionMatrix, WeightedScores};
pub use report::ClassificationReport;
