// Random forest: bagged linfa decision trees.
//
// Each tree is grown on a bootstrap sample of the rows over every feature
// column. linfa trees cannot draw split candidates per node, and a fixed
// per-tree subspace starves trees on sparse TF-IDF rows, so column
// subsampling is opt-in through `max_features`. Prediction is a majority
// vote; ties go to the lower class index.

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::traits::{check_fit_input, Classifier};
use crate::error::ModelError;
use crate::output::progress_bar;

pub const NAME: &str = "Random Forest";

#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    /// Number of trees (default 100)
    pub n_trees: usize,
    /// Depth limit per tree; None grows until leaves are pure (default)
    pub max_depth: Option<usize>,
    /// Random feature columns per tree; None uses every column (default)
    pub max_features: Option<usize>,
    /// Sample rows with replacement for each tree (default true)
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

struct Member {
    features: Vec<usize>,
    tree: DecisionTree<f64, usize>,
}

pub struct ForestClassifier {
    params: ForestParams,
    members: Vec<Member>,
    n_classes: usize,
}

impl ForestClassifier {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            members: Vec::new(),
            n_classes: 0,
        }
    }

    /// Number of fitted trees.
    pub fn n_trees(&self) -> usize {
        self.members.len()
    }

    /// Vote counts per row and class.
    pub fn votes(&self, x: &Array2<f64>) -> Result<Array2<usize>, ModelError> {
        if self.members.is_empty() {
            return Err(ModelError::NotFitted(NAME.to_string()));
        }

        let mut votes = Array2::<usize>::zeros((x.nrows(), self.n_classes));
        for member in &self.members {
            if let Some(&col) = member.features.iter().find(|&&c| c >= x.ncols()) {
                return Err(ModelError::predict(
                    NAME,
                    format!("feature column {col} missing from input with {} columns", x.ncols()),
                ));
            }
            let sub = x.select(Axis(1), &member.features);
            let predicted = member.tree.predict(&sub);
            for (row, &class) in predicted.iter().enumerate() {
                if class < self.n_classes {
                    votes[[row, class]] += 1;
                }
            }
        }
        Ok(votes)
    }

    fn features_per_tree(&self, n_features: usize) -> usize {
        self.params
            .max_features
            .map_or(n_features, |k| k.clamp(1, n_features))
    }
}

impl Classifier for ForestClassifier {
    fn name(&self) -> &str {
        NAME
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>, n_classes: usize) -> Result<(), ModelError> {
        check_fit_input(NAME, x, y, n_classes)?;
        if self.params.n_trees == 0 || x.ncols() == 0 {
            return Err(ModelError::InvalidParams {
                model: NAME.to_string(),
                message: "need at least one tree and one feature column".to_string(),
            });
        }

        let n_samples = x.nrows();
        let n_features = x.ncols();
        let k = self.features_per_tree(n_features);
        let mut rng = StdRng::seed_from_u64(self.params.seed);

        self.members.clear();
        self.n_classes = n_classes;

        let pb = progress_bar(self.params.n_trees as u64, "Forest trees");

        for t in 0..self.params.n_trees {
            let rows: Vec<usize> = if self.params.bootstrap {
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
            } else {
                (0..n_samples).collect()
            };
            let features: Vec<usize> = if k == n_features {
                (0..n_features).collect()
            } else {
                let mut subset = sample(&mut rng, n_features, k).into_vec();
                subset.sort_unstable();
                subset
            };

            let records = x.select(Axis(0), &rows).select(Axis(1), &features);
            let targets = y.select(Axis(0), &rows);
            let dataset = Dataset::new(records, targets);

            let tree = DecisionTree::<f64, usize>::params()
                .max_depth(self.params.max_depth)
                .fit(&dataset)
                .map_err(|e| ModelError::fit(NAME, format!("tree {t}: {e}")))?;

            self.members.push(Member { features, tree });
            pb.inc(1);
        }
        pb.finish_and_clear();

        debug!(trees = self.members.len(), features_per_tree = k, "Forest grown");
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>, ModelError> {
        let votes = self.votes(x)?;
        Ok(votes
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for (class, &count) in row.iter().enumerate() {
                    if count > row[best] {
                        best = class;
                    }
                }
                best
            })
            .collect())
    }
}
