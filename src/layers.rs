//! Dense layer with weights, bias, and an activation function.
use crate::activations::Activation;
use rand::Rng;
use std::sync::Arc;

/// Matrix type
pub type Matrix = Vec<Vec<f64>>;

/// A fully-connected (dense) layer.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub weights: Matrix,
    pub bias: Vec<f64>,
    pub activation: Arc<dyn Activation + Send + Sync>,
}

impl DenseLayer {
    /// Create a new dense layer using He (Kaiming) uniform initialization and small positive bias.
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: Arc<dyn Activation + Send + Sync>,
    ) -> Self {
        let mut rng = rand::thread_rng();
        // He uniform: U(-sqrt(6/fan_in), sqrt(6/fan_in))
        let limit = (6.0f64 / (input_size as f64)).sqrt();
        let weights: Matrix = (0..output_size)
            .map(|_| (0..input_size).map(|_| rng.gen_range(-limit..limit)).collect())
            .collect();
        let bias = vec![0.01; output_size];
        Self { weights, bias, activation }
    }

    pub fn input_size(&self) -> usize {
        self.weights.first().map_or(0, |row| row.len())
    }

    pub fn output_size(&self) -> usize {
        self.bias.len()
    }

    /// Forward pass: computes pre-activations `z = W·x + b` and activations `a = act(z)`.
    pub fn forward(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let z: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, &b)| row.iter().zip(input).map(|(&w, &i)| w * i).sum::<f64>() + b)
            .collect();
        let a = self.activation.apply_vec(&z);
        (z, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::ActivationKind;

    #[test]
    fn forward_has_output_shape() {
        let layer = DenseLayer::new(4, 3, ActivationKind::ReLU.to_arc());
        let (z, a) = layer.forward(&[0.1, 0.2, 0.3, 0.4]);
        assert_eq!(z.len(), 3);
        assert_eq!(a.len(), 3);
        assert_eq!(layer.input_size(), 4);
        assert_eq!(layer.output_size(), 3);
        // ReLU output is never negative
        assert!(a.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn init_is_bounded_by_he_limit() {
        let layer = DenseLayer::new(6, 8, ActivationKind::ReLU.to_arc());
        let limit = (6.0f64 / 6.0).sqrt();
        for row in &layer.weights {
            assert!(row.iter().all(|w| w.abs() <= limit));
        }
        assert!(layer.bias.iter().all(|&b| b == 0.01));
    }
}
