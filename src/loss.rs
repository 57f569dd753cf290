//! Loss functions for training.
use crate::error::{ModelError, Result};

/// Cross-entropy loss (assumes `pred` is a valid probability distribution)
pub fn cross_entropy_loss(pred: &[f64], target: &[f64]) -> Result<f64> {
    if pred.len() != target.len() {
        return Err(ModelError::Training(format!(
            "prediction width {} does not match target width {}",
            pred.len(),
            target.len()
        )));
    }
    let eps = 1e-12;
    let mut loss = 0.0;
    for (&p, &t) in pred.iter().zip(target) {
        let pp = p.clamp(eps, 1.0 - eps);
        loss -= t * pp.ln();
    }
    Ok(loss)
}
