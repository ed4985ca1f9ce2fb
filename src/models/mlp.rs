// Multilayer perceptron.
//
// Fully connected ReLU hidden layers feeding a softmax output, trained on
// mean cross-entropy plus an L2 penalty with Adam over shuffled
// mini-batches. Training stops once the epoch loss has failed to improve
// by `tol` for more than `n_iter_no_change` consecutive epochs, or at
// `max_iter` epochs, whichever comes first.

use ndarray::{Array, Array1, Array2, Axis, Dimension, Zip};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::traits::{check_fit_input, Classifier};
use crate::error::ModelError;
use crate::output::progress_bar;

pub const NAME: &str = "Multilayer Perceptron";

const BETA_1: f64 = 0.9;
const BETA_2: f64 = 0.999;
const EPSILON: f64 = 1e-8;

/// Network shape and optimizer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MlpParams {
    /// Width of each hidden layer (default 100, 50)
    pub hidden_layers: Vec<usize>,
    /// Maximum number of epochs (default 500)
    pub max_iter: usize,
    /// Adam step size (default 0.001)
    pub learning_rate: f64,
    /// L2 penalty strength (default 0.0001)
    pub alpha: f64,
    /// Mini-batch size, capped at the number of rows (default 200)
    pub batch_size: usize,
    /// Minimum loss improvement that resets the patience counter (default 1e-4)
    pub tol: f64,
    /// Epochs without improvement tolerated before stopping (default 10)
    pub n_iter_no_change: usize,
    pub seed: u64,
}

impl Default for MlpParams {
    fn default() -> Self {
        Self {
            hidden_layers: vec![100, 50],
            max_iter: 500,
            learning_rate: 1e-3,
            alpha: 1e-4,
            batch_size: 200,
            tol: 1e-4,
            n_iter_no_change: 10,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
struct Layer {
    weights: Array2<f64>,
    bias: Array1<f64>,
}

/// Adam moment estimates for one layer.
#[derive(Debug, Clone)]
struct Moments {
    m_w: Array2<f64>,
    v_w: Array2<f64>,
    m_b: Array1<f64>,
    v_b: Array1<f64>,
}

struct Gradients {
    weights: Array2<f64>,
    bias: Array1<f64>,
}

#[derive(Debug, Clone)]
pub struct MlpClassifier {
    params: MlpParams,
    layers: Vec<Layer>,
    loss_curve: Vec<f64>,
    converged: bool,
}

impl MlpClassifier {
    pub fn new(params: MlpParams) -> Self {
        Self {
            params,
            layers: Vec::new(),
            loss_curve: Vec::new(),
            converged: false,
        }
    }

    /// Mean training loss per completed epoch.
    pub fn loss_curve(&self) -> &[f64] {
        &self.loss_curve
    }

    /// Whether training stopped on the patience rule rather than `max_iter`.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Class probabilities for each row (rows sum to 1).
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::NotFitted(NAME.to_string()));
        }
        let expected = self.layers[0].weights.nrows();
        if x.ncols() != expected {
            return Err(ModelError::predict(
                NAME,
                format!("expected {expected} features, got {}", x.ncols()),
            ));
        }
        let activations = self.forward(x.clone());
        Ok(activations.into_iter().last().unwrap_or_else(|| Array2::zeros((0, 0))))
    }

    fn validate_params(&self) -> Result<(), ModelError> {
        let p = &self.params;
        let invalid = |message: &str| ModelError::InvalidParams {
            model: NAME.to_string(),
            message: message.to_string(),
        };
        if p.hidden_layers.iter().any(|&w| w == 0) {
            return Err(invalid("hidden layer widths must be positive"));
        }
        if p.max_iter == 0 || p.batch_size == 0 {
            return Err(invalid("max_iter and batch_size must be positive"));
        }
        if p.learning_rate <= 0.0 || p.alpha < 0.0 {
            return Err(invalid("learning_rate must be positive and alpha non-negative"));
        }
        Ok(())
    }

    /// Glorot-uniform initialization for every layer.
    fn init_layers(&mut self, n_features: usize, n_classes: usize, rng: &mut StdRng) {
        let mut sizes = vec![n_features];
        sizes.extend_from_slice(&self.params.hidden_layers);
        sizes.push(n_classes);

        self.layers = sizes
            .windows(2)
            .map(|pair| {
                let (fan_in, fan_out) = (pair[0], pair[1]);
                let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
                Layer {
                    weights: Array2::from_shape_simple_fn((fan_in, fan_out), || {
                        rng.gen_range(-bound..bound)
                    }),
                    bias: Array1::from_shape_simple_fn(fan_out, || rng.gen_range(-bound..bound)),
                }
            })
            .collect();
    }

    /// Activations of every layer, input first, softmax probabilities last.
    fn forward(&self, input: Array2<f64>) -> Vec<Array2<f64>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input);

        for (i, layer) in self.layers.iter().enumerate() {
            let prev = &activations[activations.len() - 1];
            let mut z = prev.dot(&layer.weights) + &layer.bias;
            if i + 1 == self.layers.len() {
                softmax_rows(&mut z);
            } else {
                z.mapv_inplace(|v| v.max(0.0));
            }
            activations.push(z);
        }
        activations
    }

    /// Loss and gradients for one mini-batch.
    fn backprop(&self, xb: Array2<f64>, yb: &Array2<f64>) -> (f64, Vec<Gradients>) {
        let n = xb.nrows() as f64;
        let activations = self.forward(xb);
        let probs = &activations[activations.len() - 1];

        let data_loss = -Zip::from(probs)
            .and(yb)
            .fold(0.0, |acc, &p, &y| acc + y * p.max(1e-10).ln())
            / n;
        let penalty: f64 = self
            .layers
            .iter()
            .map(|l| l.weights.iter().map(|w| w * w).sum::<f64>())
            .sum();
        let loss = data_loss + 0.5 * self.params.alpha * penalty / n;

        let mut grads = Vec::with_capacity(self.layers.len());
        let mut delta = probs - yb;

        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            let input = &activations[i];

            let weights = (input.t().dot(&delta) + &(&layer.weights * self.params.alpha)) / n;
            let bias = delta.sum_axis(Axis(0)) / n;
            grads.push(Gradients { weights, bias });

            if i > 0 {
                let mut next = delta.dot(&layer.weights.t());
                Zip::from(&mut next).and(input).for_each(|d, &a| {
                    if a <= 0.0 {
                        *d = 0.0;
                    }
                });
                delta = next;
            }
        }

        grads.reverse();
        (loss, grads)
    }
}

impl Classifier for MlpClassifier {
    fn name(&self) -> &str {
        NAME
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>, n_classes: usize) -> Result<(), ModelError> {
        check_fit_input(NAME, x, y, n_classes)?;
        self.validate_params()?;

        let n_samples = x.nrows();
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        self.init_layers(x.ncols(), n_classes, &mut rng);
        self.loss_curve.clear();
        self.converged = false;

        let mut one_hot = Array2::<f64>::zeros((n_samples, n_classes));
        for (row, &label) in y.iter().enumerate() {
            one_hot[[row, label]] = 1.0;
        }

        let mut moments: Vec<Moments> = self
            .layers
            .iter()
            .map(|l| Moments {
                m_w: Array2::zeros(l.weights.raw_dim()),
                v_w: Array2::zeros(l.weights.raw_dim()),
                m_b: Array1::zeros(l.bias.raw_dim()),
                v_b: Array1::zeros(l.bias.raw_dim()),
            })
            .collect();

        let batch_size = self.params.batch_size.min(n_samples);
        let mut order: Vec<usize> = (0..n_samples).collect();
        let mut step = 0i32;
        let mut best_loss = f64::INFINITY;
        let mut no_improvement = 0usize;

        let pb = progress_bar(self.params.max_iter as u64, "MLP epochs");

        for _epoch in 0..self.params.max_iter {
            order.shuffle(&mut rng);
            let mut epoch_loss = 0.0;

            for batch in order.chunks(batch_size) {
                let xb = x.select(Axis(0), batch);
                let yb = one_hot.select(Axis(0), batch);
                let (loss, grads) = self.backprop(xb, &yb);
                epoch_loss += loss * batch.len() as f64;

                step += 1;
                let lr = self.params.learning_rate * (1.0 - BETA_2.powi(step)).sqrt()
                    / (1.0 - BETA_1.powi(step));
                for ((layer, m), g) in self.layers.iter_mut().zip(&mut moments).zip(&grads) {
                    adam_step(&mut layer.weights, &mut m.m_w, &mut m.v_w, &g.weights, lr);
                    adam_step(&mut layer.bias, &mut m.m_b, &mut m.v_b, &g.bias, lr);
                }
            }

            epoch_loss /= n_samples as f64;
            self.loss_curve.push(epoch_loss);
            pb.inc(1);

            if epoch_loss > best_loss - self.params.tol {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }
            if epoch_loss < best_loss {
                best_loss = epoch_loss;
            }
            if no_improvement > self.params.n_iter_no_change {
                self.converged = true;
                break;
            }
        }
        pb.finish_and_clear();

        if self.converged {
            info!(
                epochs = self.loss_curve.len(),
                loss = best_loss,
                "MLP training converged"
            );
        } else {
            warn!(
                max_iter = self.params.max_iter,
                loss = best_loss,
                "MLP reached max_iter before the loss stopped improving"
            );
        }
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>, ModelError> {
        let probs = self.predict_proba(x)?;
        Ok(probs
            .rows()
            .into_iter()
            .map(|row| argmax(row.iter().copied()))
            .collect())
    }
}

fn softmax_rows(z: &mut Array2<f64>) {
    for mut row in z.rows_mut() {
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row /= sum;
    }
}

fn adam_step<D: Dimension>(
    param: &mut Array<f64, D>,
    m: &mut Array<f64, D>,
    v: &mut Array<f64, D>,
    grad: &Array<f64, D>,
    lr: f64,
) {
    Zip::from(param)
        .and(m)
        .and(v)
        .and(grad)
        .for_each(|p, m, v, &g| {
            *m = BETA_1 * *m + (1.0 - BETA_1) * g;
            *v = BETA_2 * *v + (1.0 - BETA_2) * g * g;
            *p -= lr * *m / (v.sqrt() + EPSILON);
        });
}

/// Index of the largest value; the first one wins ties.
pub(crate) fn argmax(values: impl Iterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, v) in values.enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}
