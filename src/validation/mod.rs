// src/validation/mod.rs

//! Input and state checks shared by the simulator and the analyzer.

use crate::core::{ClassifierError, NUM_QUBITS, Result, StateVector};

// Default tolerance (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the squared amplitudes of `state` sum to 1.
///
/// # Arguments
/// * `state` - The state to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Err(ClassifierError::Unnormalized)` if the deviation exceeds the tolerance.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm = state.norm_sqr();
    if (norm - 1.0).abs() > effective_tolerance {
        Err(ClassifierError::Unnormalized { norm })
    } else {
        Ok(())
    }
}

/// Rejects NaN and infinite angles.
pub fn check_angle(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ClassifierError::InvalidAngle { name, value })
    }
}

/// Checks that `outcome` is a bit string over the four classifier qubits.
pub fn check_outcome(outcome: &str) -> Result<()> {
    let malformed = |reason: String| ClassifierError::MalformedOutcome { outcome: outcome.to_string(), reason };

    if outcome.chars().count() != NUM_QUBITS {
        return Err(malformed(format!("expected {} bits, found {}", NUM_QUBITS, outcome.chars().count())));
    }
    if let Some(bad) = outcome.chars().find(|c| *c != '0' && *c != '1') {
        return Err(malformed(format!("'{}' is not a bit", bad)));
    }
    Ok(())
}

/// Rejects negative, NaN and infinite outcome weights.
pub fn check_weight(outcome: &str, weight: f64) -> Result<f64> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(ClassifierError::InvalidWeight { outcome: outcome.to_string(), weight })
    }
}
