// Classifiers under comparison.
//
// ModelConfig is the declarative side (what to build, with which
// hyperparameters); the Classifier trait is the runtime side.

pub mod forest;
pub mod mlp;
pub mod naive_bayes;
pub mod svm;
pub mod traits;

pub use forest::{ForestClassifier, ForestParams};
pub use mlp::{MlpClassifier, MlpParams};
pub use naive_bayes::{NaiveBayesClassifier, NaiveBayesParams};
pub use svm::{SvmClassifier, SvmParams};
pub use traits::Classifier;

/// One classifier configuration in the comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelConfig {
    Mlp(MlpParams),
    NaiveBayes(NaiveBayesParams),
    Svm(SvmParams),
    RandomForest(ForestParams),
}

impl ModelConfig {
    /// The four configurations under comparison, in report order.
    pub fn default_set() -> Vec<Self> {
        vec![
            ModelConfig::Mlp(MlpParams::default()),
            ModelConfig::NaiveBayes(NaiveBayesParams::default()),
            ModelConfig::Svm(SvmParams::default()),
            ModelConfig::RandomForest(ForestParams::default()),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelConfig::Mlp(_) => mlp::NAME,
            ModelConfig::NaiveBayes(_) => naive_bayes::NAME,
            ModelConfig::Svm(_) => svm::NAME,
            ModelConfig::RandomForest(_) => forest::NAME,
        }
    }

    /// The model's RNG seed, for models that use one.
    pub fn seed(&self) -> Option<u64> {
        match self {
            ModelConfig::Mlp(p) => Some(p.seed),
            ModelConfig::RandomForest(p) => Some(p.seed),
            ModelConfig::NaiveBayes(_) | ModelConfig::Svm(_) => None,
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        match self {
            ModelConfig::Mlp(p) => p.seed = seed,
            ModelConfig::RandomForest(p) => p.seed = seed,
            ModelConfig::NaiveBayes(_) | ModelConfig::Svm(_) => {}
        }
    }

    /// Construct a fresh, unfitted classifier.
    pub fn build(&self) -> Box<dyn Classifier> {
        match self {
            ModelConfig::Mlp(p) => Box::new(MlpClassifier::new(p.clone())),
            ModelConfig::NaiveBayes(p) => Box::new(NaiveBayesClassifier::new(p.clone())),
            ModelConfig::Svm(p) => Box::new(SvmClassifier::new(p.clone())),
            ModelConfig::RandomForest(p) => Box::new(ForestClassifier::new(p.clone())),
        }
    }
}
