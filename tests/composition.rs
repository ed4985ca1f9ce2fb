// Composition tests: running the whole comparison end to end.
//
// These tests exercise the data flow between stages:
//   CSV -> TF-IDF -> stratified split -> four classifiers -> reports
// on a small synthetic corpus written to a temp directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use hoaxeval::config::Config;
use hoaxeval::error::PipelineError;
use hoaxeval::models::{ForestParams, MlpParams, ModelConfig, NaiveBayesParams, SvmParams};
use hoaxeval::pipeline;

const HOAX_WORDS: [&str; 8] = [
    "shocking", "viral", "secret", "miracle", "conspiracy", "share", "cure", "hidden",
];
const VALID_WORDS: [&str; 8] = [
    "ministry", "official", "report", "statement", "announced", "budget", "agency", "data",
];
const COMMON_WORDS: [&str; 6] = ["news", "today", "people", "city", "week", "government"];

/// 1000 rows, 60% label 0 and 40% label 1, each text built from its
/// class vocabulary plus shared filler words.
fn write_corpus(dir: &Path) -> PathBuf {
    let path = dir.join("data.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Text,label").unwrap();

    for i in 0..1000usize {
        let label = usize::from(i % 5 >= 3);
        let words = if label == 1 { &HOAX_WORDS } else { &VALID_WORDS };
        let text = format!(
            "{} {} {} {} {}",
            words[i % 8],
            COMMON_WORDS[i % 6],
            words[(i * 3 + 1) % 8],
            COMMON_WORDS[(i + 2) % 6],
            words[(i * 7 + 5) % 8],
        );
        writeln!(file, "\"{text}\",{label}").unwrap();
    }
    path
}

/// The default four models, shrunk so the run stays fast.
fn small_models() -> Vec<ModelConfig> {
    vec![
        ModelConfig::Mlp(MlpParams {
            hidden_layers: vec![16, 8],
            learning_rate: 0.01,
            max_iter: 100,
            ..MlpParams::default()
        }),
        ModelConfig::NaiveBayes(NaiveBayesParams::default()),
        ModelConfig::Svm(SvmParams::default()),
        ModelConfig::RandomForest(ForestParams {
            n_trees: 15,
            ..ForestParams::default()
        }),
    ]
}

fn config_for(data_path: PathBuf, output_dir: PathBuf) -> Config {
    Config {
        data_path,
        output_dir,
        models: small_models(),
        ..Config::default()
    }
}

/// CSV lines with the training-time column dropped.
fn without_timing(csv: &str) -> Vec<String> {
    csv.lines()
        .map(|line| {
            let mut cells: Vec<&str> = line.split(',').collect();
            cells.pop();
            cells.join(",")
        })
        .collect()
}

// ============================================================
// Chain: load -> prepare -> train -> report
// ============================================================

#[test]
fn full_run_produces_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let out = dir.path().join("out");
    let config = config_for(data, out.clone());

    let summary = pipeline::run(&config).unwrap();

    let names: Vec<&str> = summary
        .evaluation
        .results
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Multilayer Perceptron",
            "Naive Bayes",
            "Support Vector Machine",
            "Random Forest"
        ]
    );
    assert!(summary.evaluation.failures.is_empty());

    assert!(summary.results_path.exists());
    assert!(summary.metrics_chart_path.exists());
    assert!(summary.confusion_chart_path.exists());
    assert_eq!(summary.results_path, out.join("hasil_perbandingan_model.csv"));

    let svg = std::fs::read_to_string(&summary.confusion_chart_path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn results_csv_has_header_and_one_row_per_model() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let config = config_for(data, dir.path().join("out"));

    let summary = pipeline::run(&config).unwrap();
    let csv = std::fs::read_to_string(&summary.results_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "Algorithm,Precision,Recall,F1 Score,Accuracy,Training Time (s)"
    );
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("Multilayer Perceptron,"));
    assert!(lines[4].starts_with("Random Forest,"));

    for line in &lines[1..] {
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells.len(), 6);
        for cell in &cells[1..5] {
            let value: f64 = cell.parse().unwrap();
            assert!((0.0..=1.0).contains(&value), "metric out of range: {line}");
            assert_eq!(cell.split('.').nth(1).map(str::len), Some(4));
        }
        let seconds: f64 = cells[5].parse().unwrap();
        assert!(seconds >= 0.0);
    }
}

#[test]
fn confusion_matrices_cover_the_test_partition() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let config = config_for(data, dir.path().join("out"));

    let summary = pipeline::run(&config).unwrap();

    // 1000 rows, 20% held out: 120 of class 0 and 80 of class 1
    for (name, cm) in summary.evaluation.confusion_matrices() {
        assert_eq!(cm.total(), 200, "{name}");
        assert_eq!(cm.support(), vec![120, 80], "{name}");
    }
}

#[test]
fn separable_corpus_is_learned() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let config = config_for(data, dir.path().join("out"));

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.evaluation.results.len(), 4);
    for result in &summary.evaluation.results {
        assert!(
            result.accuracy > 0.9,
            "{} accuracy {}",
            result.name,
            result.accuracy
        );
    }
}

#[test]
fn repeated_runs_match_except_timing() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());

    let first = pipeline::run(&config_for(data.clone(), dir.path().join("a"))).unwrap();
    let second = pipeline::run(&config_for(data, dir.path().join("b"))).unwrap();

    let a = std::fs::read_to_string(&first.results_path).unwrap();
    let b = std::fs::read_to_string(&second.results_path).unwrap();
    assert_eq!(without_timing(&a), without_timing(&b));
}

// ============================================================
// Failure paths
// ============================================================

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let config = config_for(dir.path().join("absent.csv"), out.clone());

    let err = pipeline::run(&config).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("not found"));
    assert!(!out.join("hasil_perbandingan_model.csv").exists());
    assert!(!out.join("perbandingan_metrik.svg").exists());
    assert!(!out.join("confusion_matrices.svg").exists());
}

#[test]
fn missing_label_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let config = Config {
        label_column: "is_hoax".to_string(),
        ..config_for(data, dir.path().join("out"))
    };

    let err = pipeline::run(&config).unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("is_hoax"));
}

/// An MLP with a zero-width hidden layer is rejected before training.
fn invalid_mlp() -> ModelConfig {
    ModelConfig::Mlp(MlpParams {
        hidden_layers: vec![0],
        ..MlpParams::default()
    })
}

#[test]
fn failed_model_is_skipped_when_keep_going() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let mut config = config_for(data, dir.path().join("out"));
    config.models[0] = invalid_mlp();
    assert!(config.keep_going);

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.evaluation.results.len(), 3);
    assert_eq!(summary.evaluation.failures.len(), 1);
    assert_eq!(summary.evaluation.failures[0].name, "Multilayer Perceptron");
    assert!(summary.evaluation.get("Multilayer Perceptron").is_none());

    let csv = std::fs::read_to_string(&summary.results_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Naive Bayes,"));
    assert!(summary.confusion_chart_path.exists());
}

#[test]
fn failed_model_aborts_without_keep_going() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let out = dir.path().join("out");
    let mut config = config_for(data, out.clone());
    config.models[0] = invalid_mlp();
    config.keep_going = false;

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Model(_)));
    assert!(err.to_string().contains("invalid parameters"));
    assert!(!out.exists());
}

#[test]
fn every_model_failing_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_corpus(dir.path());
    let out = dir.path().join("out");
    let config = Config {
        models: vec![
            invalid_mlp(),
            ModelConfig::RandomForest(ForestParams {
                n_trees: 0,
                ..ForestParams::default()
            }),
        ],
        ..config_for(data, out.clone())
    };

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::AllModelsFailed(2)));
    assert_eq!(err.to_string(), "All 2 models failed to train");
    assert!(!out.exists());
}
