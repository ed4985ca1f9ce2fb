use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::features::tfidf::{StopWords, TfidfParams};
use crate::models::ModelConfig;

pub const RESULTS_FILE: &str = "hasil_perbandingan_model.csv";
pub const METRICS_CHART_FILE: &str = "perbandingan_metrik.svg";
pub const CONFUSION_CHART_FILE: &str = "confusion_matrices.svg";

/// How the labeled rows are divided into train and test partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    /// Fraction of rows held out for testing (default 0.2)
    pub test_fraction: f64,
    /// Seed for the split shuffle and for every seeded model (default 42)
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Everything a pipeline run needs. Defaults fit the hoax-news dataset layout.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input CSV with a header row
    pub data_path: PathBuf,
    /// Column holding the article text
    pub text_column: String,
    /// Column holding the hoax / not-hoax label
    pub label_column: String,
    /// Raw label value to treat as the positive class. When unset, the larger
    /// of the two sorted label values is positive.
    pub positive_label: Option<String>,
    /// Directory the results table and both charts are written to
    pub output_dir: PathBuf,
    pub split: SplitConfig,
    pub vectorizer: TfidfParams,
    /// Classifiers to compare, evaluated in this order
    pub models: Vec<ModelConfig>,
    /// Keep evaluating the remaining models when one fails to train
    pub keep_going: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("/content/data.csv"),
            text_column: "Text".to_string(),
            label_column: "label".to_string(),
            positive_label: None,
            output_dir: PathBuf::from("."),
            split: SplitConfig::default(),
            vectorizer: TfidfParams::default(),
            models: ModelConfig::default_set(),
            keep_going: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset. The .env file is read by main before this.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var("HOAXEVAL_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }
        if let Ok(column) = env::var("HOAXEVAL_TEXT_COLUMN") {
            config.text_column = column;
        }
        if let Ok(column) = env::var("HOAXEVAL_LABEL_COLUMN") {
            config.label_column = column;
        }
        config.positive_label = env::var("HOAXEVAL_POSITIVE_LABEL").ok();
        if let Ok(dir) = env::var("HOAXEVAL_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(fraction) = parse_env::<f64>("HOAXEVAL_TEST_SIZE")? {
            config.split.test_fraction = fraction;
        }
        if let Some(seed) = parse_env::<u64>("HOAXEVAL_SEED")? {
            config.set_seed(seed);
        }
        if let Some(max_features) = parse_env::<usize>("HOAXEVAL_MAX_FEATURES")? {
            config.vectorizer.max_features = Some(max_features);
        }
        match env::var("HOAXEVAL_STOP_WORDS").as_deref() {
            Ok("english") => config.vectorizer.stop_words = StopWords::English,
            Ok("none") | Err(_) => {}
            Ok(other) => anyhow::bail!(
                "HOAXEVAL_STOP_WORDS must be 'english' or 'none', got '{other}'"
            ),
        }

        Ok(config)
    }

    /// Use `seed` for the split and for every model that takes one.
    pub fn set_seed(&mut self, seed: u64) {
        self.split.seed = seed;
        for model in &mut self.models {
            model.set_seed(seed);
        }
    }

    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE)
    }

    pub fn metrics_chart_path(&self) -> PathBuf {
        self.output_dir.join(METRICS_CHART_FILE)
    }

    pub fn confusion_chart_path(&self) -> PathBuf {
        self.output_dir.join(CONFUSION_CHART_FILE)
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}
