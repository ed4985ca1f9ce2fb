// Confusion matrix and the scores derived from it.
//
// Rows are actual classes, columns are predicted classes. Per-class
// precision/recall/F1 follow the zero-division rule of the common ML
// toolkits: an undefined ratio scores 0.0.

use ndarray::{Array1, Array2};

/// Counts of (actual, predicted) class pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    counts: Array2<usize>,
}

/// Precision, recall, F1 and support for one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Support-weighted averages plus overall accuracy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub accuracy: f64,
}

impl ConfusionMatrix {
    /// Tally `actual` against `predicted`. Labels outside `0..n_classes` are skipped.
    pub fn from_labels(actual: &Array1<usize>, predicted: &Array1<usize>, n_classes: usize) -> Self {
        let mut counts = Array2::<usize>::zeros((n_classes, n_classes));
        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            if a < n_classes && p < n_classes {
                counts[[a, p]] += 1;
            }
        }
        Self { counts }
    }

    pub fn n_classes(&self) -> usize {
        self.counts.nrows()
    }

    /// Count of rows with actual class `actual` predicted as `predicted`.
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[[actual, predicted]]
    }

    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.sum()
    }

    /// True instances of each class (row sums).
    pub fn support(&self) -> Vec<usize> {
        self.counts.rows().into_iter().map(|r| r.sum()).collect()
    }

    /// Predictions of each class (column sums).
    pub fn predicted_totals(&self) -> Vec<usize> {
        self.counts.columns().into_iter().map(|c| c.sum()).collect()
    }

    /// Largest single cell, used to scale heatmap colours.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes()).map(|i| self.counts[[i, i]]).sum();
        correct as f64 / total as f64
    }

    /// Scores for every class, indexed by class.
    pub fn class_scores(&self) -> Vec<ClassScores> {
        let support = self.support();
        let predicted = self.predicted_totals();

        (0..self.n_classes())
            .map(|c| {
                let tp = self.counts[[c, c]] as f64;
                let precision = ratio(tp, predicted[c] as f64);
                let recall = ratio(tp, support[c] as f64);
                let f1 = ratio(2.0 * precision * recall, precision + recall);
                ClassScores {
                    precision,
                    recall,
                    f1,
                    support: support[c],
                }
            })
            .collect()
    }

    /// Support-weighted precision, recall and F1, plus accuracy.
    pub fn weighted(&self) -> WeightedScores {
        let scores = self.class_scores();
        let total: usize = scores.iter().map(|s| s.support).sum();

        let weighted = |f: fn(&ClassScores) -> f64| -> f64 {
            if total == 0 {
                return 0.0;
            }
            scores.iter().map(|s| f(s) * s.support as f64).sum::<f64>() / total as f64
        };

        WeightedScores {
            precision: weighted(|s| s.precision),
            recall: weighted(|s| s.recall),
            f1: weighted(|s| s.f1),
            accuracy: self.accuracy(),
        }
    }

    /// Unweighted mean of each per-class score.
    pub fn macro_average(&self) -> (f64, f64, f64) {
        let scores = self.class_scores();
        let k = scores.len().max(1) as f64;
        (
            scores.iter().map(|s| s.precision).sum::<f64>() / k,
            scores.iter().map(|s| s.recall).sum::<f64>() / k,
            scores.iter().map(|s| s.f1).sum::<f64>() / k,
        )
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
