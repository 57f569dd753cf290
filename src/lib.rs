//! In-memory classification pipeline for synthetic demo datasets: profile
//! generation, min-max normalization, heuristic MLP architecture selection,
//! Adam + cross-entropy training, and confusion-matrix metrics.
//!
//! - Five fixed dataset profiles generated fresh per request, never persisted
//! - One training call per request; the model never outlives the call
//! - Typed errors, logged once at the orchestration boundary

pub mod activations;
pub mod arch;
pub mod backend;
pub mod datasets;
pub mod error;
pub mod layers;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod normalize;
pub mod optimizer;
pub mod pipeline;
pub mod report;
pub mod train;

pub use activations::{Activation, ActivationKind, ReLU, Softmax};
pub use arch::{select_architecture, LayerSpec};
pub use backend::{init_backend, is_ready};
pub use datasets::{get_dataset, one_hot, profiles, DatasetData, DatasetProfile, ProfileId};
pub use error::{ModelError, Result};
pub use layers::DenseLayer;
pub use metrics::{accuracy, confusion_matrix, macro_metrics, per_class_metrics, ClassMetrics};
pub use network::{FitConfig, FitReport, Mlp};
pub use normalize::min_max_normalize;
pub use pipeline::{train_model, train_on_profile, TrainResult};
pub use train::{train_and_evaluate, Evaluation};
