//! Error taxonomy for the training pipeline.
use thiserror::Error;

/// Errors surfaced by the dataset/training pipeline.
///
/// Everything propagates upward with `?` and is logged exactly once at the
/// orchestration boundary. The only silently-handled conditions are the two
/// numeric policies in [`crate::metrics`]: out-of-range confusion-matrix
/// indices are skipped, and zero-denominator metrics evaluate to 0.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Requested dataset profile name is not in the catalog.
    #[error("no dataset named `{0}`")]
    UnknownDataset(String),
    /// Dataset or split cannot be trained on (empty side, fewer than 2 classes).
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    /// The numeric backend failed its self-check and training is disabled.
    #[error("numeric backend is unavailable")]
    BackendUnavailable,
    /// Failure during fit, evaluation, or prediction.
    #[error("training failed: {0}")]
    Training(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
