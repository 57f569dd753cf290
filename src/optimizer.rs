//! Adam optimizer with per-layer moment buffers.
use crate::layers::{DenseLayer, Matrix};
use crate::network::Gradients;

/// Adam with bias-corrected first and second moments.
#[derive(Debug)]
pub struct Adam {
    lr: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    t: i32,
    slots: Vec<Slot>,
}

#[derive(Debug)]
struct Slot {
    m_w: Matrix,
    v_w: Matrix,
    m_b: Vec<f64>,
    v_b: Vec<f64>,
}

impl Adam {
    /// Standard defaults: beta1 = 0.9, beta2 = 0.999, epsilon = 1e-8.
    pub fn new(lr: f64) -> Self {
        Self { lr, beta1: 0.9, beta2: 0.999, epsilon: 1e-8, t: 0, slots: Vec::new() }
    }

    /// Apply one update from gradients averaged over a batch.
    ///
    /// `layers` and `grads` must list the same dense layers in the same
    /// order; moment buffers are allocated on first use.
    pub fn step(&mut self, layers: &mut [&mut DenseLayer], grads: &Gradients) {
        self.t += 1;
        for (idx, layer) in layers.iter_mut().enumerate() {
            if self.slots.len() <= idx {
                self.slots.push(Slot {
                    m_w: vec![vec![0.0; layer.input_size()]; layer.output_size()],
                    v_w: vec![vec![0.0; layer.input_size()]; layer.output_size()],
                    m_b: vec![0.0; layer.output_size()],
                    v_b: vec![0.0; layer.output_size()],
                });
            }
            let slot = &mut self.slots[idx];
            let bc1 = 1.0 - self.beta1.powi(self.t);
            let bc2 = 1.0 - self.beta2.powi(self.t);

            for (i, row) in layer.weights.iter_mut().enumerate() {
                for (j, w) in row.iter_mut().enumerate() {
                    let g = grads.d_w[idx][i][j];
                    slot.m_w[i][j] = self.beta1 * slot.m_w[i][j] + (1.0 - self.beta1) * g;
                    slot.v_w[i][j] = self.beta2 * slot.v_w[i][j] + (1.0 - self.beta2) * g * g;
                    let m_hat = slot.m_w[i][j] / bc1;
                    let v_hat = slot.v_w[i][j] / bc2;
                    *w -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
                }
            }
            for (i, b) in layer.bias.iter_mut().enumerate() {
                let g = grads.d_b[idx][i];
                slot.m_b[i] = self.beta1 * slot.m_b[i] + (1.0 - self.beta1) * g;
                slot.v_b[i] = self.beta2 * slot.v_b[i] + (1.0 - self.beta2) * g * g;
                let m_hat = slot.m_b[i] / bc1;
                let v_hat = slot.v_b[i] / bc2;
                *b -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
            }
        }
    }
}
