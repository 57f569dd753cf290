//! Numeric backend lifecycle.
//!
//! Initialization runs once per process, performs a small forward-pass
//! self-check, and records a readiness flag. A failed self-check leaves the
//! process in a degraded mode where training requests are refused instead of
//! crashing anything else.
use crate::arch::select_architecture;
use crate::error::{ModelError, Result};
use crate::network::Mlp;
use std::sync::OnceLock;
use tracing::{info, warn};

static READY: OnceLock<bool> = OnceLock::new();

fn self_check() -> bool {
    let probe = match Mlp::from_spec(4, &select_architecture(4, 3)) {
        Ok(mlp) => mlp,
        Err(e) => {
            warn!(error = %e, "backend self-check failed to build probe network");
            return false;
        }
    };
    let output = probe.forward(&[0.25, 0.5, 0.75, 1.0]);
    let sum: f64 = output.iter().sum();
    let ok = output.len() == 3 && output.iter().all(|v| v.is_finite()) && (sum - 1.0).abs() < 1e-6;
    if ok {
        info!("numeric backend ready");
    } else {
        warn!("backend self-check produced a non-distribution output; entering degraded mode");
    }
    ok
}

/// Initialize the backend, once. Subsequent calls return the cached flag.
pub fn init_backend() -> bool {
    *READY.get_or_init(self_check)
}

/// Whether the backend has been initialized successfully. `false` both for
/// a degraded backend and for one not yet initialized.
pub fn is_ready() -> bool {
    READY.get().copied().unwrap_or(false)
}

/// Lazily initialize and gate training on readiness.
pub(crate) fn ensure_ready() -> Result<()> {
    if init_backend() {
        Ok(())
    } else {
        Err(ModelError::BackendUnavailable)
    }
}
