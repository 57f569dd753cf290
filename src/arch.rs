//! Fixed network-architecture heuristic keyed on input dimensionality.
use crate::activations::ActivationKind;

/// One layer of a feed-forward network specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerSpec {
    Dense { units: usize, activation: ActivationKind },
    Dropout { rate: f64 },
}

/// Choose a small feed-forward topology for the given input width.
///
/// High-dimensional inputs (more than 20 features, e.g. the digits profile)
/// get a deeper path with dropout; everything else gets two small dense
/// layers. The output layer is always `num_classes` softmax units. This is a
/// fixed heuristic, not a search.
pub fn select_architecture(input_dim: usize, num_classes: usize) -> Vec<LayerSpec> {
    let mut spec = Vec::new();
    if input_dim > 20 {
        spec.push(LayerSpec::Dense {
            units: (input_dim / 2 + 1).min(64),
            activation: ActivationKind::ReLU,
        });
        spec.push(LayerSpec::Dropout { rate: 0.2 });
        spec.push(LayerSpec::Dense {
            units: (input_dim / 3 + 1).min(32),
            activation: ActivationKind::ReLU,
        });
        spec.push(LayerSpec::Dropout { rate: 0.2 });
    } else {
        spec.push(LayerSpec::Dense {
            units: (input_dim + 2).min(16),
            activation: ActivationKind::ReLU,
        });
        spec.push(LayerSpec::Dense {
            units: (input_dim / 2 + 1).min(8),
            activation: ActivationKind::ReLU,
        });
    }
    spec.push(LayerSpec::Dense {
        units: num_classes,
        activation: ActivationKind::Softmax,
    });
    spec
}
