//! Orchestration: dataset selection + split percentage in, `TrainResult` out.
use crate::backend;
use crate::datasets::{get_dataset, DatasetData};
use crate::error::{ModelError, Result};
use crate::metrics::confusion_matrix;
use crate::train::train_and_evaluate;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::error;

/// Aggregate result of one training request. Immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct TrainResult {
    pub predictions: Vec<usize>,
    pub accuracy: f64,
    pub confusion_matrix: Vec<Vec<usize>>,
}

/// Prefix/suffix cut of the sample collection in generation order.
///
/// No shuffle: generation order is class-contiguous, so at high percentages
/// the test split may hold zero samples of the earliest classes. That is the
/// documented behavior, not a bug to fix here.
fn split_point(num_samples: usize, train_percentage: u32) -> usize {
    num_samples * train_percentage as usize / 100
}

/// Train and evaluate on the given dataset with a `train_percentage` prefix
/// split. Errors are logged here once and propagated to the caller; there
/// are no retries.
pub fn train_model(dataset: &DatasetData, train_percentage: u32) -> Result<TrainResult> {
    backend::ensure_ready()?;
    run_training(dataset, train_percentage).inspect_err(|e| {
        error!(error = %e, "model training failed");
    })
}

fn run_training(dataset: &DatasetData, train_percentage: u32) -> Result<TrainResult> {
    let num_samples = dataset.data.len();
    let num_classes = dataset.target.iter().copied().collect::<BTreeSet<_>>().len();
    if num_samples == 0 || num_classes < 2 {
        return Err(ModelError::InvalidDataset(
            "dataset is empty or has insufficient classes".into(),
        ));
    }

    let num_train = split_point(num_samples, train_percentage);
    if num_train == 0 || num_train >= num_samples {
        return Err(ModelError::InvalidDataset(format!(
            "train percentage {train_percentage} leaves an empty split for {num_samples} samples"
        )));
    }

    let (train_data, test_data) = dataset.data.split_at(num_train);
    let (train_labels, test_labels) = dataset.target.split_at(num_train);

    let eval = train_and_evaluate(train_data, train_labels, test_data, test_labels, num_classes)?;
    let matrix = confusion_matrix(&eval.predictions, test_labels, num_classes);

    Ok(TrainResult {
        predictions: eval.predictions,
        accuracy: eval.accuracy,
        confusion_matrix: matrix,
    })
}

/// Look up a profile by name and train on it. Generator absence becomes
/// [`ModelError::UnknownDataset`] before any training starts.
pub fn train_on_profile(name: &str, train_percentage: u32) -> Result<TrainResult> {
    let dataset =
        get_dataset(name).ok_or_else(|| ModelError::UnknownDataset(name.to_string()))?;
    train_model(&dataset, train_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_both_sides_non_empty_across_slider_range() {
        for num_samples in [150usize, 180, 200, 390, 500] {
            for pct in 50..=90u32 {
                let num_train = split_point(num_samples, pct);
                assert!(num_train > 0, "{num_samples} @ {pct}%");
                assert!(num_train < num_samples, "{num_samples} @ {pct}%");
                assert_eq!(num_train, num_samples * pct as usize / 100);
            }
        }
    }

    #[test]
    fn unknown_profile_is_rejected_before_training() {
        let err = train_on_profile("no_such_dataset", 80).unwrap_err();
        assert!(matches!(err, ModelError::UnknownDataset(name) if name == "no_such_dataset"));
    }

    #[test]
    fn single_class_dataset_is_invalid() {
        let dataset = DatasetData {
            data: vec![vec![0.0, 1.0]; 10],
            target: vec![0; 10],
            feature_names: vec!["a".into(), "b".into()],
            target_names: vec!["only".into()],
            description: String::new(),
        };
        let err = train_model(&dataset, 80).unwrap_err();
        assert!(matches!(err, ModelError::InvalidDataset(_)));
    }

    #[test]
    fn degenerate_split_is_invalid() {
        let dataset = DatasetData {
            data: vec![vec![0.0], vec![1.0]],
            target: vec![0, 1],
            feature_names: vec!["a".into()],
            target_names: vec!["x".into(), "y".into()],
            description: String::new(),
        };
        // 2 samples at 90% -> floor(1.8) = 1 train, 1 test: fine.
        // 2 samples at 50% -> 1/1: fine. 1 sample can never split.
        let one = DatasetData { data: vec![vec![0.0]], target: vec![0], ..dataset.clone() };
        let err = train_model(&one, 80).unwrap_err();
        assert!(matches!(err, ModelError::InvalidDataset(_)));
    }
}
