// Per-class classification report, laid out like the familiar
// precision / recall / f1-score / support text table.

use std::fmt;

use super::confusion::{ClassScores, ConfusionMatrix};

/// Per-class scores plus accuracy, macro and weighted averages.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub class_names: Vec<String>,
    pub classes: Vec<ClassScores>,
    pub accuracy: f64,
    pub macro_avg: (f64, f64, f64),
    pub weighted_avg: (f64, f64, f64),
    pub total: usize,
}

impl ClassificationReport {
    /// Build from a confusion matrix. `class_names[i]` labels row/column `i`.
    pub fn new(cm: &ConfusionMatrix, class_names: &[String]) -> Self {
        let weighted = cm.weighted();
        Self {
            class_names: class_names.to_vec(),
            classes: cm.class_scores(),
            accuracy: cm.accuracy(),
            macro_avg: cm.macro_average(),
            weighted_avg: (weighted.precision, weighted.recall, weighted.f1),
            total: cm.total(),
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .class_names
            .iter()
            .map(|n| n.chars().count())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(12);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for (name, scores) in self.class_names.iter().zip(&self.classes) {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, scores.precision, scores.recall, scores.f1, scores.support
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total
        )?;
        let (p, r, f1) = self.macro_avg;
        writeln!(
            f,
            "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            "macro avg", p, r, f1, self.total
        )?;
        let (p, r, f1) = self.weighted_avg;
        write!(
            f,
            "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            "weighted avg", p, r, f1, self.total
        )
    }
}
