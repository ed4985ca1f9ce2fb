use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{error, info};

use hoaxeval::config::Config;
use hoaxeval::features::StopWords;
use hoaxeval::pipeline;

/// hoaxeval: Compare four text classifiers on a hoax-news dataset.
///
/// Loads a CSV of labeled articles, vectorizes the text with TF-IDF, trains
/// an MLP, Naive Bayes, an SVM, and a Random Forest on the same stratified
/// split, then writes a comparison table and two charts.
#[derive(Parser)]
#[command(name = "hoaxeval", version, about)]
struct Cli {
    /// Input CSV file (overrides HOAXEVAL_DATA_PATH)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Directory for the results table and charts (default: current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seed for the split and every seeded model (default: 42)
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of rows held out for testing (default: 0.2)
    #[arg(long)]
    test_size: Option<f64>,

    /// Vocabulary size cap for TF-IDF (default: 5000)
    #[arg(long)]
    max_features: Option<usize>,

    /// Drop English stop words before counting terms
    #[arg(long)]
    stop_words: bool,

    /// Name of the text column (default: Text)
    #[arg(long)]
    text_column: Option<String>,

    /// Name of the label column (default: label)
    #[arg(long)]
    label_column: Option<String>,

    /// Label value to treat as the positive (hoax) class
    #[arg(long)]
    positive_label: Option<String>,

    /// Abort on the first model that fails instead of skipping it
    #[arg(long)]
    fail_fast: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the env-derived config.
    fn apply(self, config: &mut Config) {
        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(seed) = self.seed {
            config.set_seed(seed);
        }
        if let Some(fraction) = self.test_size {
            config.split.test_fraction = fraction;
        }
        if let Some(max_features) = self.max_features {
            config.vectorizer.max_features = Some(max_features);
        }
        if self.stop_words {
            config.vectorizer.stop_words = StopWords::English;
        }
        if let Some(column) = self.text_column {
            config.text_column = column;
        }
        if let Some(column) = self.label_column {
            config.label_column = column;
        }
        if self.positive_label.is_some() {
            config.positive_label = self.positive_label;
        }
        if self.fail_fast {
            config.keep_going = false;
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hoaxeval=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            println!("{} {e:#}", "Error:".red().bold());
            return Ok(());
        }
    };
    cli.apply(&mut config);

    info!(
        data = %config.data_path.display(),
        output_dir = %config.output_dir.display(),
        seed = config.split.seed,
        "Starting model comparison"
    );

    // A failed run is reported, not propagated: the process still exits 0
    match pipeline::run(&config) {
        Ok(summary) => {
            println!(
                "\n{} {} model(s) compared.",
                "Done.".green().bold(),
                summary.evaluation.results.len()
            );
        }
        Err(e) => {
            if e.is_not_found() {
                error!(path = %config.data_path.display(), "Input file missing");
            } else {
                error!(error = %e, "Pipeline failed");
            }
            println!("{} {e}", "Error:".red().bold());
        }
    }

    Ok(())
}
