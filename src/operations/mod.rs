// src/operations/mod.rs

//! Gate-level operations that make up a classifier circuit.
//!
//! The set is deliberately small: the classifier only ever needs Hadamards,
//! bit flips, real Y rotations and multi-controlled flips, plus measurement.

use crate::core::QubitId;

/// A single step of a circuit.
#[derive(Debug, Clone, PartialEq)] // f64 parameters rule out Eq
pub enum Operation {
    /// Hadamard transform, taking |0> to an equal superposition.
    Hadamard {
        /// Qubit to transform.
        target: QubitId,
    },

    /// Computational-basis bit flip (Pauli X).
    Flip {
        /// Qubit to flip.
        target: QubitId,
    },

    /// Real rotation about the Y axis, `u3(theta, 0, 0)`.
    ///
    /// Takes |0> to `cos(theta/2)|0> + sin(theta/2)|1>`.
    RotateY {
        /// Qubit to rotate.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Flips `target` when every qubit in `controls` is |1>.
    ///
    /// One control is a CNOT, two a Toffoli.
    ControlledFlip {
        /// Qubits that must all be excited for the flip to happen.
        controls: Vec<QubitId>,
        /// Qubit that is flipped.
        target: QubitId,
    },

    /// Stage separator. Has no effect on the state.
    Barrier,

    /// Computational-basis measurement of the listed qubits.
    Measure {
        /// Qubits whose outcomes are recorded.
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// Returns every qubit named by the operation, controls first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Hadamard { target } => vec![*target],
            Operation::Flip { target } => vec![*target],
            Operation::RotateY { target, .. } => vec![*target],
            Operation::ControlledFlip { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Operation::Barrier => Vec::new(),
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// Short gate label used by the circuit diagram.
    pub fn symbol(&self) -> String {
        match self {
            Operation::Hadamard { .. } => "H".to_string(),
            Operation::Flip { .. } | Operation::ControlledFlip { .. } => "X".to_string(),
            Operation::RotateY { theta, .. } => format!("Ry({:.2})", theta),
            Operation::Barrier => "░".to_string(),
            Operation::Measure { .. } => "M".to_string(),
        }
    }
}
