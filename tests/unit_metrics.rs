// Unit tests for evaluation metrics: confusion matrix layout, weighted
// scores, zero-division handling, and the classification report.

use hoaxeval::metrics::{ClassificationReport, ConfusionMatrix};
use ndarray::Array1;

fn sample() -> ConfusionMatrix {
    // [[3, 1],
    //  [0, 2]]
    let actual = Array1::from(vec![0, 0, 0, 0, 1, 1]);
    let predicted = Array1::from(vec![0, 0, 0, 1, 1, 1]);
    ConfusionMatrix::from_labels(&actual, &predicted, 2)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ============================================================
// Confusion matrix
// ============================================================

#[test]
fn rows_are_actual_columns_predicted() {
    let cm = sample();
    assert_eq!(cm.get(0, 0), 3);
    assert_eq!(cm.get(0, 1), 1);
    assert_eq!(cm.get(1, 0), 0);
    assert_eq!(cm.get(1, 1), 2);
    assert_eq!(cm.max_count(), 3);
}

#[test]
fn row_sums_equal_class_support() {
    let cm = sample();
    assert_eq!(cm.support(), vec![4, 2]);
    assert_eq!(cm.predicted_totals(), vec![3, 3]);
    assert_eq!(cm.total(), 6);
}

// ============================================================
// Weighted scores
// ============================================================

#[test]
fn weighted_scores_use_support() {
    let w = sample().weighted();
    assert!(close(w.precision, (4.0 * 1.0 + 2.0 * (2.0 / 3.0)) / 6.0));
    assert!(close(w.recall, 5.0 / 6.0));
    assert!(close(w.f1, (4.0 * (6.0 / 7.0) + 2.0 * 0.8) / 6.0));
    assert!(close(w.accuracy, 5.0 / 6.0));
}

#[test]
fn weighted_recall_equals_accuracy() {
    let actual = Array1::from(vec![0, 1, 1, 0, 1, 0, 0, 1, 1, 1]);
    let predicted = Array1::from(vec![0, 1, 0, 0, 1, 1, 0, 1, 0, 1]);
    let w = ConfusionMatrix::from_labels(&actual, &predicted, 2).weighted();
    assert!(close(w.recall, w.accuracy));
}

#[test]
fn constant_predictor_scores_zero_for_missing_class() {
    let actual = Array1::from(vec![0, 0, 0, 1, 1]);
    let predicted = Array1::from(vec![0, 0, 0, 0, 0]);
    let cm = ConfusionMatrix::from_labels(&actual, &predicted, 2);

    let scores = cm.class_scores();
    assert_eq!(scores[1].precision, 0.0);
    assert_eq!(scores[1].f1, 0.0);

    let w = cm.weighted();
    assert!(close(w.accuracy, 0.6));
    assert!(close(w.precision, 0.6 * 0.6));
    for value in [w.precision, w.recall, w.f1, w.accuracy] {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn perfect_predictions_score_one() {
    let labels = Array1::from(vec![0, 1, 0, 1, 1]);
    let w = ConfusionMatrix::from_labels(&labels, &labels, 2).weighted();
    assert_eq!((w.precision, w.recall, w.f1, w.accuracy), (1.0, 1.0, 1.0, 1.0));
}

// ============================================================
// Classification report
// ============================================================

#[test]
fn report_lists_each_class_and_averages() {
    let names = vec!["0".to_string(), "1".to_string()];
    let report = ClassificationReport::new(&sample(), &names);
    let text = report.to_string();

    assert!(text.contains("precision"));
    assert!(text.contains("support"));
    assert!(text.contains("accuracy"));
    assert!(text.contains("macro avg"));
    assert!(text.contains("weighted avg"));
    // Class 0 row: precision 1.00, recall 0.75, support 4
    let row0 = text
        .lines()
        .find(|l| l.trim_start().starts_with("0 "))
        .unwrap();
    assert!(row0.contains("1.00"));
    assert!(row0.contains("0.75"));
    assert!(row0.trim_end().ends_with('4'));
}

#[test]
fn report_totals_match_matrix() {
    let names = vec!["valid".to_string(), "hoax".to_string()];
    let report = ClassificationReport::new(&sample(), &names);
    assert_eq!(report.total, 6);
    assert_eq!(report.classes.len(), 2);
    assert!(close(report.accuracy, 5.0 / 6.0));
}
