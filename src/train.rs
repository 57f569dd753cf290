//! The training step: normalize, build, fit, predict.
use crate::arch::select_architecture;
use crate::datasets::one_hot;
use crate::error::{ModelError, Result};
use crate::metrics::accuracy;
use crate::network::{FitConfig, Mlp};
use crate::normalize::min_max_normalize;
use tracing::debug;

/// Test-split predictions and accuracy from one training call.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub predictions: Vec<usize>,
    pub accuracy: f64,
}

/// Number of fit epochs: fewer for larger training sets, clamped to [10, 50].
fn adaptive_epochs(train_len: usize) -> usize {
    (100.0 - train_len as f64 / 10.0).clamp(10.0, 50.0) as usize
}

/// Batch size: a tenth of the training set, at least 1, at most 32.
fn adaptive_batch_size(train_len: usize) -> usize {
    (train_len / 10).max(1).min(32)
}

/// Fit a freshly-selected network on the training split and evaluate it on
/// the held-out split.
///
/// Both splits are normalized independently by their own column statistics.
/// The network, optimizer state, and all forward caches are owned by this
/// call and dropped on every exit path.
pub fn train_and_evaluate(
    train_data: &[Vec<f64>],
    train_labels: &[usize],
    test_data: &[Vec<f64>],
    test_labels: &[usize],
    num_classes: usize,
) -> Result<Evaluation> {
    if train_data.is_empty() || test_data.is_empty() {
        return Err(ModelError::InvalidDataset("training or test data is empty".into()));
    }
    if num_classes < 2 {
        return Err(ModelError::InvalidDataset(format!(
            "need at least 2 classes, got {num_classes}"
        )));
    }

    let train_norm = min_max_normalize(train_data);
    let test_norm = min_max_normalize(test_data);
    let input_dim = train_norm[0].len();

    let spec = select_architecture(input_dim, num_classes);
    let mut mlp = Mlp::from_spec(input_dim, &spec)?;
    debug!(model = %mlp, "network selected");

    let dataset: Vec<(Vec<f64>, Vec<f64>)> = train_norm
        .into_iter()
        .zip(train_labels)
        .map(|(input, &label)| (input, one_hot(label, num_classes)))
        .collect();

    let cfg = FitConfig {
        epochs: adaptive_epochs(dataset.len()),
        batch_size: adaptive_batch_size(dataset.len()),
        learning_rate: 0.01,
        validation_split: 0.2,
    };
    let report = mlp.fit(&dataset, &cfg)?;
    debug!(final_loss = report.final_loss, "fit complete");

    let predictions: Vec<usize> = test_norm.iter().map(|row| mlp.predict_class(row)).collect();
    let accuracy = accuracy(&predictions, test_labels);
    Ok(Evaluation { predictions, accuracy })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochs_shrink_with_training_size() {
        assert_eq!(adaptive_epochs(100), 50);
        assert_eq!(adaptive_epochs(600), 40);
        assert_eq!(adaptive_epochs(850), 15);
        assert_eq!(adaptive_epochs(2000), 10);
    }

    #[test]
    fn batch_size_is_a_tenth_clamped() {
        assert_eq!(adaptive_batch_size(5), 1);
        assert_eq!(adaptive_batch_size(120), 12);
        assert_eq!(adaptive_batch_size(1000), 32);
    }

    #[test]
    fn empty_split_is_invalid() {
        let data = vec![vec![0.0, 1.0]];
        let labels = vec![0usize];
        let err = train_and_evaluate(&[], &[], &data, &labels, 2).unwrap_err();
        assert!(matches!(err, ModelError::InvalidDataset(_)));
        let err = train_and_evaluate(&data, &labels, &[], &[], 2).unwrap_err();
        assert!(matches!(err, ModelError::InvalidDataset(_)));
    }

    #[test]
    fn single_class_is_invalid() {
        let data = vec![vec![0.0], vec![1.0]];
        let labels = vec![0usize, 0];
        let err = train_and_evaluate(&data, &labels, &data, &labels, 1).unwrap_err();
        assert!(matches!(err, ModelError::InvalidDataset(_)));
    }

    #[test]
    fn produces_one_prediction_per_test_sample() {
        let train: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![i as f64 / 40.0, 1.0 - i as f64 / 40.0])
            .collect();
        let train_labels: Vec<usize> = (0..40).map(|i| usize::from(i >= 20)).collect();
        let test: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64 / 10.0, 0.5]).collect();
        let test_labels: Vec<usize> = (0..10).map(|i| usize::from(i >= 5)).collect();
        let eval = train_and_evaluate(&train, &train_labels, &test, &test_labels, 2).unwrap();
        assert_eq!(eval.predictions.len(), 10);
        assert!(eval.predictions.iter().all(|&p| p < 2));
        assert!((0.0..=1.0).contains(&eval.accuracy));
    }
}
