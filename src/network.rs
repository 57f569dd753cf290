//! Feed-forward network built from a layer specification, with mini-batch
//! training (Adam + categorical cross-entropy) and inference.
use crate::arch::LayerSpec;
use crate::error::{ModelError, Result};
use crate::layers::{DenseLayer, Matrix};
use crate::loss::cross_entropy_loss;
use crate::optimizer::Adam;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Index of the largest value, 0 for an empty slice.
pub(crate) fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0usize, |max_i, (i, &v)| if v > values[max_i] { i } else { max_i })
}

#[derive(Debug)]
enum Block {
    Dense(DenseLayer),
    Dropout { rate: f64 },
}

/// Per-sample forward caches used by backprop.
enum TapeEntry {
    /// Input to the dense layer and its pre-activations.
    Dense { input: Vec<f64>, z: Vec<f64> },
    /// Scaled keep/drop multipliers applied to the activations.
    Dropout { mask: Vec<f64> },
}

/// Gradients for all dense layers in order.
#[derive(Debug)]
pub struct Gradients {
    pub d_w: Vec<Matrix>,
    pub d_b: Vec<Vec<f64>>,
}

impl Gradients {
    fn zeros_for(layers: &[&DenseLayer]) -> Self {
        Self {
            d_w: layers
                .iter()
                .map(|l| vec![vec![0.0; l.input_size()]; l.output_size()])
                .collect(),
            d_b: layers.iter().map(|l| vec![0.0; l.output_size()]).collect(),
        }
    }

    fn add(&mut self, other: &Gradients) {
        for (acc, g) in self.d_w.iter_mut().zip(&other.d_w) {
            for (acc_row, g_row) in acc.iter_mut().zip(g) {
                for (a, &v) in acc_row.iter_mut().zip(g_row) {
                    *a += v;
                }
            }
        }
        for (acc, g) in self.d_b.iter_mut().zip(&other.d_b) {
            for (a, &v) in acc.iter_mut().zip(g) {
                *a += v;
            }
        }
    }

    fn scale(&mut self, factor: f64) {
        for m in &mut self.d_w {
            for row in m {
                for v in row {
                    *v *= factor;
                }
            }
        }
        for b in &mut self.d_b {
            for v in b {
                *v *= factor;
            }
        }
    }
}

/// Training-loop configuration.
#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Fraction of the training data held out for per-epoch monitoring.
    /// The holdout is the tail of the slice and never reaches the optimizer.
    pub validation_split: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 32,
            learning_rate: 0.01,
            validation_split: 0.2,
        }
    }
}

/// Outcome of a completed fit.
#[derive(Debug, Clone, Copy)]
pub struct FitReport {
    /// Average training loss of the final epoch.
    pub final_loss: f64,
}

/// Feed-forward network. Lives for one training call; dropped with all of
/// its weights when the caller's scope ends.
#[derive(Debug)]
pub struct Mlp {
    blocks: Vec<Block>,
    input_size: usize,
    output_size: usize,
}

impl Mlp {
    /// Build a network from a layer specification.
    pub fn from_spec(input_size: usize, spec: &[LayerSpec]) -> Result<Self> {
        if input_size == 0 {
            return Err(ModelError::Training("network input width is zero".into()));
        }
        let mut blocks = Vec::with_capacity(spec.len());
        let mut prev = input_size;
        for layer in spec {
            match *layer {
                LayerSpec::Dense { units, activation } => {
                    if units == 0 {
                        return Err(ModelError::Training("dense layer has zero units".into()));
                    }
                    blocks.push(Block::Dense(DenseLayer::new(prev, units, activation.to_arc())));
                    prev = units;
                }
                LayerSpec::Dropout { rate } => {
                    if !(0.0..1.0).contains(&rate) {
                        return Err(ModelError::Training(format!(
                            "dropout rate {rate} outside [0, 1)"
                        )));
                    }
                    blocks.push(Block::Dropout { rate });
                }
            }
        }
        if blocks.is_empty() {
            return Err(ModelError::Training("network spec has no layers".into()));
        }
        Ok(Self { blocks, input_size, output_size: prev })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Inference forward pass; dropout is the identity here.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for block in &self.blocks {
            if let Block::Dense(layer) = block {
                let (_, a) = layer.forward(&current);
                current = a;
            }
        }
        current
    }

    /// Class-probability prediction for a single input.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        self.forward(input)
    }

    /// Arg-max class for a single input.
    pub fn predict_class(&self, input: &[f64]) -> usize {
        argmax(&self.forward(input))
    }

    /// Fraction of inputs whose arg-max prediction matches the label.
    pub fn evaluate(&self, data: &[Vec<f64>], labels: &[usize]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let correct = data
            .iter()
            .zip(labels)
            .filter(|(input, &label)| self.predict_class(input) == label)
            .count();
        correct as f64 / data.len() as f64
    }

    /// Training forward pass with dropout masks, recording caches for backprop.
    fn forward_train(&self, input: &[f64], rng: &mut ThreadRng) -> (Vec<f64>, Vec<TapeEntry>) {
        let mut tape = Vec::with_capacity(self.blocks.len());
        let mut current = input.to_vec();
        for block in &self.blocks {
            match block {
                Block::Dense(layer) => {
                    let (z, a) = layer.forward(&current);
                    tape.push(TapeEntry::Dense { input: current, z });
                    current = a;
                }
                Block::Dropout { rate } => {
                    // Inverted dropout: surviving units are scaled so the
                    // expected activation matches inference.
                    let scale = 1.0 / (1.0 - rate);
                    let mask: Vec<f64> = current
                        .iter()
                        .map(|_| if rng.gen::<f64>() < *rate { 0.0 } else { scale })
                        .collect();
                    current = current.iter().zip(&mask).map(|(&v, &m)| v * m).collect();
                    tape.push(TapeEntry::Dropout { mask });
                }
            }
        }
        (current, tape)
    }

    /// Backprop for one sample. `y_hat` must come from a softmax output so
    /// the combined softmax+CE delta `y_hat - target` applies.
    fn backward(&self, tape: &[TapeEntry], y_hat: &[f64], target: &[f64]) -> Gradients {
        let mut delta: Vec<f64> = y_hat.iter().zip(target).map(|(&p, &t)| p - t).collect();
        let mut d_w_rev: Vec<Matrix> = Vec::new();
        let mut d_b_rev: Vec<Vec<f64>> = Vec::new();
        let mut at_output_layer = true;
        for (block, entry) in self.blocks.iter().zip(tape).rev() {
            match (block, entry) {
                (Block::Dense(layer), TapeEntry::Dense { input, z }) => {
                    // Skip the activation derivative at the softmax output;
                    // it is already folded into the delta.
                    let dz: Vec<f64> = if at_output_layer {
                        at_output_layer = false;
                        delta.clone()
                    } else {
                        delta
                            .iter()
                            .zip(z)
                            .map(|(&d, &val)| d * layer.activation.derivative(val))
                            .collect()
                    };
                    d_b_rev.push(dz.clone());
                    let mut d_w_layer: Matrix = vec![vec![0.0; input.len()]; dz.len()];
                    for (i, &dz_i) in dz.iter().enumerate() {
                        for (j, &a_prev_j) in input.iter().enumerate() {
                            d_w_layer[i][j] = dz_i * a_prev_j;
                        }
                    }
                    d_w_rev.push(d_w_layer);
                    // delta_prev = W^T * dz
                    let mut delta_prev = vec![0.0; input.len()];
                    for (i, row) in layer.weights.iter().enumerate() {
                        for (j, &w) in row.iter().enumerate() {
                            delta_prev[j] += w * dz[i];
                        }
                    }
                    delta = delta_prev;
                }
                (Block::Dropout { .. }, TapeEntry::Dropout { mask }) => {
                    delta = delta.iter().zip(mask).map(|(&d, &m)| d * m).collect();
                }
                _ => unreachable!("tape out of sync with network blocks"),
            }
        }
        d_w_rev.reverse();
        d_b_rev.reverse();
        Gradients { d_w: d_w_rev, d_b: d_b_rev }
    }

    /// Fit the network to `(input, one-hot target)` pairs.
    ///
    /// The tail `validation_split` fraction is held out for monitoring only;
    /// its loss and accuracy are logged per epoch and never influence the
    /// reported metrics. Sample order is reshuffled every epoch.
    pub fn fit(&mut self, dataset: &[(Vec<f64>, Vec<f64>)], cfg: &FitConfig) -> Result<FitReport> {
        if dataset.is_empty() {
            return Err(ModelError::Training("training set is empty".into()));
        }
        if cfg.epochs == 0 || cfg.batch_size == 0 {
            return Err(ModelError::Training("epochs and batch size must be positive".into()));
        }
        if !(0.0..1.0).contains(&cfg.validation_split) {
            return Err(ModelError::Training(format!(
                "validation split {} outside [0, 1)",
                cfg.validation_split
            )));
        }
        for (input, target) in dataset {
            if input.len() != self.input_size || target.len() != self.output_size {
                return Err(ModelError::Training("input/target size mismatch".into()));
            }
        }

        let val_len = (dataset.len() as f64 * cfg.validation_split).floor() as usize;
        let (fit_set, val_set) = dataset.split_at(dataset.len() - val_len);
        let mut adam = Adam::new(cfg.learning_rate);
        let mut rng = rand::thread_rng();
        let mut final_loss = 0.0;

        for epoch in 0..cfg.epochs {
            let mut indices: Vec<usize> = (0..fit_set.len()).collect();
            indices.shuffle(&mut rng);
            let mut total_loss = 0.0;

            for chunk in indices.chunks(cfg.batch_size) {
                let dense_refs: Vec<&DenseLayer> = self
                    .blocks
                    .iter()
                    .filter_map(|b| match b {
                        Block::Dense(l) => Some(l),
                        Block::Dropout { .. } => None,
                    })
                    .collect();
                let mut grads = Gradients::zeros_for(&dense_refs);
                for &idx in chunk {
                    let (input, target) = &fit_set[idx];
                    let (y_hat, tape) = self.forward_train(input, &mut rng);
                    total_loss += cross_entropy_loss(&y_hat, target)?;
                    grads.add(&self.backward(&tape, &y_hat, target));
                }
                grads.scale(1.0 / chunk.len() as f64);
                let mut dense_mut: Vec<&mut DenseLayer> = self
                    .blocks
                    .iter_mut()
                    .filter_map(|b| match b {
                        Block::Dense(l) => Some(l),
                        Block::Dropout { .. } => None,
                    })
                    .collect();
                adam.step(&mut dense_mut, &grads);
            }

            final_loss = total_loss / fit_set.len() as f64;
            if val_set.is_empty() {
                debug!(epoch = epoch + 1, train_loss = final_loss, "epoch complete");
            } else {
                let mut val_loss = 0.0;
                let mut val_correct = 0usize;
                for (input, target) in val_set {
                    let y = self.forward(input);
                    val_loss += cross_entropy_loss(&y, target)?;
                    if argmax(&y) == argmax(target) {
                        val_correct += 1;
                    }
                }
                debug!(
                    epoch = epoch + 1,
                    train_loss = final_loss,
                    val_loss = val_loss / val_set.len() as f64,
                    val_accuracy = val_correct as f64 / val_set.len() as f64,
                    "epoch complete"
                );
            }
        }
        Ok(FitReport { final_loss })
    }
}

impl fmt::Display for Mlp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sizes = vec![self.input_size];
        for block in &self.blocks {
            if let Block::Dense(layer) = block {
                sizes.push(layer.output_size());
            }
        }
        write!(f, "Mlp: {:?}", sizes)
    }
}
