// ============================================================
// Layer 5 — Neural Network
// ============================================================
// A two-layer feed-forward network with sigmoid activations,
// trained by plain per-example stochastic gradient descent.
//
// Architecture:
//   input (I) → hidden (H) → output (O)
//
// Parameters:
//   weights_input_hidden   I×H matrix
//   weights_hidden_output  H×O matrix
//   bias_hidden            H vector
//   bias_output            O vector
//
// All weights and biases initialise uniformly in [-1, 1] from a
// caller-supplied seedable RNG, so training runs are exactly
// reproducible. That range plus a conservative learning rate is
// the only guard against numeric blow-up: the network itself
// never errors, it just computes.
//
// Backpropagation (per example):
//   output_error    = target − output            (elementwise)
//   output_gradient = output_error ⊙ output ⊙ (1 − output)
//   hidden_error    = Wᵀ(hidden→output) · output_gradient
//   hidden_gradient = hidden_error ⊙ hidden ⊙ (1 − hidden)
//   then every weight and bias moves by lr · gradient · input.
// The sigmoid derivative is expressed through the activated
// value (σ' = σ(1−σ)), so no activation is ever recomputed.
//
// Reference: Rumelhart, Hinton & Williams (1986)
//            Rust Book §8 (Vectors)

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::dataset::LabeledExample;

/// How many training iterations between mean-absolute-error
/// reports. Diagnostic only — never a stopping condition.
const ERROR_REPORT_EVERY: usize = 100;

// ─── ModelSnapshot ────────────────────────────────────────────────────────────
/// The complete persisted state of a trained network: sizes,
/// learning rate, both weight matrices, both bias vectors.
/// Reloading a snapshot reproduces forward passes bit-for-bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub input_size:    usize,
    pub hidden_size:   usize,
    pub output_size:   usize,
    pub learning_rate: f64,

    /// I×H — weights_input_hidden[i][h]
    pub weights_input_hidden: Vec<Vec<f64>>,

    /// H×O — weights_hidden_output[h][o]
    pub weights_hidden_output: Vec<Vec<f64>>,

    pub bias_hidden: Vec<f64>,
    pub bias_output: Vec<f64>,
}

impl ModelSnapshot {
    /// Check that every matrix and vector actually has the shape
    /// the declared sizes promise. A snapshot that fails this is
    /// rejected by the loader, never silently reshaped.
    pub fn is_consistent(&self) -> bool {
        self.weights_input_hidden.len() == self.input_size
            && self
                .weights_input_hidden
                .iter()
                .all(|row| row.len() == self.hidden_size)
            && self.weights_hidden_output.len() == self.hidden_size
            && self
                .weights_hidden_output
                .iter()
                .all(|row| row.len() == self.output_size)
            && self.bias_hidden.len() == self.hidden_size
            && self.bias_output.len() == self.output_size
            && self.learning_rate > 0.0
    }
}

// ─── NeuralNetwork ────────────────────────────────────────────────────────────
pub struct NeuralNetwork {
    input_size:  usize,
    hidden_size: usize,
    output_size: usize,

    learning_rate: f64,

    weights_input_hidden:  Vec<Vec<f64>>, // [I][H]
    weights_hidden_output: Vec<Vec<f64>>, // [H][O]
    bias_hidden:           Vec<f64>,      // [H]
    bias_output:           Vec<f64>,      // [O]
}

impl NeuralNetwork {
    /// Build a network with every weight and bias drawn
    /// independently and uniformly from [-1, 1]. The RNG is
    /// passed in (not created here) so callers control the seed.
    pub fn new(
        input_size:    usize,
        hidden_size:   usize,
        output_size:   usize,
        learning_rate: f64,
        rng:           &mut StdRng,
    ) -> Self {
        let weights_input_hidden = (0..input_size)
            .map(|_| (0..hidden_size).map(|_| rng.gen_range(-1.0..=1.0)).collect())
            .collect();

        let weights_hidden_output = (0..hidden_size)
            .map(|_| (0..output_size).map(|_| rng.gen_range(-1.0..=1.0)).collect())
            .collect();

        let bias_hidden = (0..hidden_size).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        let bias_output = (0..output_size).map(|_| rng.gen_range(-1.0..=1.0)).collect();

        Self {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            weights_input_hidden,
            weights_hidden_output,
            bias_hidden,
            bias_output,
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Forward pass: returns (hidden, output) activations.
    /// Both layers apply sigmoid, so every value is strictly
    /// inside (0, 1). `input` must have length input_size.
    pub fn forward(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        debug_assert_eq!(input.len(), self.input_size);

        // hidden[h] = σ(bias_hidden[h] + Σ_i input[i]·W_ih[i][h])
        let mut hidden = vec![0.0; self.hidden_size];
        for h in 0..self.hidden_size {
            let mut sum = self.bias_hidden[h];
            for (i, &x) in input.iter().enumerate() {
                sum += x * self.weights_input_hidden[i][h];
            }
            hidden[h] = sigmoid(sum);
        }

        // output[o] = σ(bias_output[o] + Σ_h hidden[h]·W_ho[h][o])
        let mut output = vec![0.0; self.output_size];
        for o in 0..self.output_size {
            let mut sum = self.bias_output[o];
            for (h, &a) in hidden.iter().enumerate() {
                sum += a * self.weights_hidden_output[h][o];
            }
            output[o] = sigmoid(sum);
        }

        (hidden, output)
    }

    /// Forward pass exposing only the output layer — callers
    /// outside training never need the hidden state.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        self.forward(input).1
    }

    /// Train with per-example SGD for a fixed iteration count.
    /// One iteration is one full pass over the dataset. There is
    /// NO early stopping — the error report is observability,
    /// not control flow.
    pub fn train(&mut self, dataset: &[LabeledExample], iterations: usize) {
        for iteration in 0..iterations {
            let mut abs_error_sum = 0.0;
            let mut value_count   = 0usize;

            for example in dataset {
                abs_error_sum += self.train_example(example);
                value_count   += self.output_size;
            }

            if (iteration + 1) % ERROR_REPORT_EVERY == 0 || iteration + 1 == iterations {
                let mae = if value_count > 0 {
                    abs_error_sum / value_count as f64
                } else {
                    0.0
                };
                tracing::debug!(
                    "iteration {:>4}/{}: mean absolute error {:.6}",
                    iteration + 1,
                    iterations,
                    mae,
                );
            }
        }
    }

    /// One forward + backward pass for a single example.
    /// Returns the summed absolute output error (for the MAE
    /// report in the caller).
    fn train_example(&mut self, example: &LabeledExample) -> f64 {
        let lr = self.learning_rate;
        let (hidden, output) = self.forward(&example.features);

        // ── Output layer gradients ────────────────────────────────────────────
        let mut output_gradient = vec![0.0; self.output_size];
        let mut abs_error_sum   = 0.0;
        for o in 0..self.output_size {
            let error = example.target[o] - output[o];
            abs_error_sum     += error.abs();
            output_gradient[o] = error * output[o] * (1.0 - output[o]);
        }

        // ── Backpropagate through the transposed hidden→output weights ───────
        let mut hidden_gradient = vec![0.0; self.hidden_size];
        for h in 0..self.hidden_size {
            let mut back_error = 0.0;
            for o in 0..self.output_size {
                back_error += self.weights_hidden_output[h][o] * output_gradient[o];
            }
            hidden_gradient[h] = back_error * hidden[h] * (1.0 - hidden[h]);
        }

        // ── Parameter updates ─────────────────────────────────────────────────
        for h in 0..self.hidden_size {
            for o in 0..self.output_size {
                self.weights_hidden_output[h][o] += lr * output_gradient[o] * hidden[h];
            }
        }
        for o in 0..self.output_size {
            self.bias_output[o] += lr * output_gradient[o];
        }
        for (i, &x) in example.features.iter().enumerate() {
            for h in 0..self.hidden_size {
                self.weights_input_hidden[i][h] += lr * hidden_gradient[h] * x;
            }
        }
        for h in 0..self.hidden_size {
            self.bias_hidden[h] += lr * hidden_gradient[h];
        }

        abs_error_sum
    }

    /// Mean absolute output error over a dataset. Used by the
    /// training-progress report and by tests.
    pub fn mean_absolute_error(&self, dataset: &[LabeledExample]) -> f64 {
        let mut sum   = 0.0;
        let mut count = 0usize;
        for example in dataset {
            let output = self.predict(&example.features);
            for (o, &y) in output.iter().enumerate() {
                sum += (example.target[o] - y).abs();
            }
            count += output.len();
        }
        if count > 0 { sum / count as f64 } else { 0.0 }
    }

    /// Capture the full parameter state. `from_snapshot` of this
    /// value reproduces `forward` bit-for-bit.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            input_size:            self.input_size,
            hidden_size:           self.hidden_size,
            output_size:           self.output_size,
            learning_rate:         self.learning_rate,
            weights_input_hidden:  self.weights_input_hidden.clone(),
            weights_hidden_output: self.weights_hidden_output.clone(),
            bias_hidden:           self.bias_hidden.clone(),
            bias_output:           self.bias_output.clone(),
        }
    }

    /// Rebuild a network from a snapshot. The caller validates
    /// consistency first (ModelSnapshot::is_consistent) — this
    /// constructor just adopts the parameters.
    pub fn from_snapshot(snapshot: ModelSnapshot) -> Self {
        Self {
            input_size:            snapshot.input_size,
            hidden_size:           snapshot.hidden_size,
            output_size:           snapshot.output_size,
            learning_rate:         snapshot.learning_rate,
            weights_input_hidden:  snapshot.weights_input_hidden,
            weights_hidden_output: snapshot.weights_hidden_output,
            bias_hidden:           snapshot.bias_hidden,
            bias_output:           snapshot.bias_output,
        }
    }
}

/// σ(x) = 1 / (1 + e^-x) — strictly inside (0, 1) for finite x.
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_forward_pass_shapes_and_open_interval() {
        let mut rng = seeded(7);
        let net = NeuralNetwork::new(5, 3, 2, 0.1, &mut rng);

        let (hidden, output) = net.forward(&[0.2, 0.0, 1.0, 0.5, 0.9]);
        assert_eq!(hidden.len(), 3);
        assert_eq!(output.len(), 2);
        // Sigmoid never reaches its bounds
        assert!(hidden.iter().chain(output.iter()).all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn test_snapshot_round_trip_is_exact() {
        let mut rng = seeded(42);
        let net = NeuralNetwork::new(4, 6, 1, 0.2, &mut rng);

        // Round-trip through the actual JSON representation,
        // exactly as the snapshot store does
        let json     = serde_json::to_string(&net.snapshot()).unwrap();
        let snapshot: ModelSnapshot = serde_json::from_str(&json).unwrap();
        assert!(snapshot.is_consistent());
        let restored = NeuralNetwork::from_snapshot(snapshot);

        let x = [0.1, 0.9, 0.33, 0.0];
        assert_eq!(net.forward(&x), restored.forward(&x));
    }

    #[test]
    fn test_inconsistent_snapshot_is_detected() {
        let mut rng  = seeded(1);
        let mut snap = NeuralNetwork::new(3, 2, 1, 0.1, &mut rng).snapshot();
        snap.input_size = 99;
        assert!(!snap.is_consistent());
    }

    #[test]
    fn test_training_reduces_error() {
        // Strongly separable synthetic set: first component on
        // means target 1, second component on means target 0
        let dataset = vec![
            LabeledExample::new(vec![1.0, 0.0], vec![1.0]),
            LabeledExample::new(vec![0.9, 0.1], vec![1.0]),
            LabeledExample::new(vec![0.0, 1.0], vec![0.0]),
            LabeledExample::new(vec![0.1, 0.9], vec![0.0]),
        ];

        let mut rng = seeded(42);
        let mut net = NeuralNetwork::new(2, 4, 1, 0.3, &mut rng);

        let error_before = net.mean_absolute_error(&dataset);
        net.train(&dataset, 1000);
        let error_after = net.mean_absolute_error(&dataset);

        assert!(
            error_after < error_before,
            "error did not decrease: {error_before} -> {error_after}"
        );
    }

    #[test]
    fn test_seeded_initialisation_is_reproducible() {
        let net_a = NeuralNetwork::new(4, 3, 1, 0.1, &mut seeded(99));
        let net_b = NeuralNetwork::new(4, 3, 1, 0.1, &mut seeded(99));

        let x = [0.5, 0.5, 0.0, 1.0];
        assert_eq!(net_a.forward(&x), net_b.forward(&x));
    }
}
