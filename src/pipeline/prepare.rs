// Preparer stage: vectorize the text column and split rows into stratified
// train/test partitions. Every model downstream reads these same matrices.

use ndarray::{Array1, Array2, Axis};
use tracing::info;

use crate::config::SplitConfig;
use crate::data::{stratified_split, LabeledDataset, SplitIndices};
use crate::error::PipelineError;
use crate::features::{TfidfParams, TfidfVectorizer};

/// Feature matrices and labels for both partitions, plus the fitted vectorizer.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<usize>,
    pub y_test: Array1<usize>,
    /// Raw label value per class index
    pub class_names: Vec<String>,
    /// Row indices into the loaded dataset
    pub split: SplitIndices,
    /// Fitted on the whole corpus; transforms new text into the same columns
    pub vectorizer: TfidfVectorizer,
}

impl PreparedData {
    pub fn n_features(&self) -> usize {
        self.x_train.ncols()
    }
}

/// Vectorize `dataset` and split it into stratified partitions.
pub fn prepare(
    dataset: &LabeledDataset,
    vectorizer_params: &TfidfParams,
    split: &SplitConfig,
) -> Result<PreparedData, PipelineError> {
    let mut vectorizer = TfidfVectorizer::new(vectorizer_params.clone());
    let features = vectorizer.fit_transform(&dataset.texts)?;

    let indices = stratified_split(
        &dataset.labels,
        dataset.n_classes(),
        split.test_fraction,
        split.seed,
    )?;

    let x_train = features.select(Axis(0), &indices.train);
    let x_test = features.select(Axis(0), &indices.test);
    let y_train = dataset.labels.select(Axis(0), &indices.train);
    let y_test = dataset.labels.select(Axis(0), &indices.test);

    info!(
        train_rows = x_train.nrows(),
        test_rows = x_test.nrows(),
        features = x_train.ncols(),
        seed = split.seed,
        "Stratified split complete"
    );

    Ok(PreparedData {
        x_train,
        x_test,
        y_train,
        y_test,
        class_names: dataset.classes.clone(),
        split: indices,
        vectorizer,
    })
}
