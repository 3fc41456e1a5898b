// src/validation/mod.rs

//! Provides functions to check internal consistency of a `StateVector`.

use crate::core::{SimError, StateVector};

/// Allowed deviation of total probability from 1.0 before the state is
/// declared numerically drifted. Can be overridden by callers.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Sum of squared amplitude magnitudes across every basis state.
/// Equals 1 (up to rounding) while only unitary gates have been applied.
pub fn total_probability(state: &StateVector) -> f64 {
    state.vector().iter().map(|c| c.norm_sqr()).sum()
}

/// Checks that the state vector is normalized (total probability ≈ 1.0).
///
/// Drift beyond tolerance is an internal-consistency failure of the
/// simulation, not a recoverable condition.
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to [`NORM_TOLERANCE`].
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimError::NumericDrift)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), SimError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = total_probability(state);
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(SimError::NumericDrift {
            total_probability: norm_sq,
        })
    } else {
        Ok(())
    }
}
