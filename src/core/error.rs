//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Position of a qubit in the simulated register.
///
/// Qubit `q` corresponds to bit `q` of a basis-state index, so qubit 0 is the
/// least significant bit and is printed last in outcome bit strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl QubitId {
    /// Bit mask selecting this qubit inside a basis-state index.
    pub fn mask(self) -> usize {
        1 << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Errors raised while preparing, simulating or analyzing a classifier run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    /// An encoding angle was NaN or infinite.
    #[error("Invalid angle '{name}': {value} is not a finite number")]
    InvalidAngle {
        /// Which angle was rejected (`test_angle` or `training_angle`)
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// A vector handed to the angle derivation has zero length or non-finite components.
    #[error("Invalid vector '{name}': must be finite with non-zero length")]
    InvalidVector {
        /// Which vector was rejected
        name: &'static str,
    },

    /// Post-selection kept nothing, so class probabilities are undefined.
    #[error("No valid samples: no weight out of {total} had the ancilla in |0>")]
    NoValidSamples {
        /// Total weight presented to the analyzer (shots or probability mass)
        total: f64,
    },

    /// An outcome carried a negative or non-finite weight.
    #[error("Invalid weight for outcome '{outcome}': {weight} is not a finite non-negative number")]
    InvalidWeight {
        /// The outcome key the weight belongs to
        outcome: String,
        /// The rejected weight
        weight: f64,
    },

    /// An outcome key is not a four-character bit string.
    #[error("Malformed outcome '{outcome}': {reason}")]
    MalformedOutcome {
        /// The rejected key
        outcome: String,
        /// Why it was rejected
        reason: String,
    },

    /// A gate referenced a qubit outside the simulated register.
    #[error("Invalid qubit {qubit}: register has only {num_qubits} qubits")]
    InvalidQubit {
        /// The out-of-range qubit
        qubit: QubitId,
        /// Size of the register
        num_qubits: usize,
    },

    /// The circuit contains an operation the simulator cannot apply.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The simulated state drifted away from unit norm.
    #[error("State normalization failed: sum of squared amplitudes is {norm}")]
    Unnormalized {
        /// Sum of |amplitude|^2 over the state
        norm: f64,
    },

    /// A configuration value could not be used.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClassifierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_angle_message() {
        let err = ClassifierError::InvalidAngle { name: "test_angle", value: f64::NAN };
        let msg = format!("{}", err);
        assert!(msg.contains("test_angle"));
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn test_no_valid_samples_message() {
        let err = ClassifierError::NoValidSamples { total: 1024.0 };
        assert!(err.to_string().contains("1024"));
        assert!(!err.to_string().contains("shots"));
    }

    #[test]
    fn test_invalid_weight_message() {
        let err = ClassifierError::InvalidWeight { outcome: "0001".to_string(), weight: -0.4 };
        let msg = err.to_string();
        assert!(msg.contains("0001"));
        assert!(msg.contains("-0.4"));
    }

    #[test]
    fn test_qubit_mask() {
        assert_eq!(QubitId(0).mask(), 0b0001);
        assert_eq!(QubitId(3).mask(), 0b1000);
        assert_eq!(QubitId(2).to_string(), "q2");
    }
}
