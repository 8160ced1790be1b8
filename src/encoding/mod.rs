// src/encoding/mod.rs

//! State preparation for the interference classifier.
//!
//! The register holds one test vector and two training vectors, all
//! amplitude-encoded on the data qubit:
//!
//! | ancilla | index | data          | class |
//! |---------|-------|---------------|-------|
//! | 0       | 0, 1  | test vector   | index |
//! | 1       | 0     | `[0, 1]`      | 0     |
//! | 1       | 1     | training vec. | 1     |
//!
//! with every branch weighted 1/2. A Hadamard on the ancilla then makes the
//! test and training branches interfere.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::constants::classifier_constants::{REFERENCE_TEST_ANGLE, REFERENCE_TRAINING_ANGLE};
use crate::core::{ANCILLA, CLASS, ClassifierError, DATA, INDEX, QubitId, Result};
use crate::operations::Operation;
use crate::validation::check_angle;
use std::f64::consts::TAU;
use tracing::debug;

/// The fixed first training vector, labelled class 0.
pub const FIRST_TRAINING_VECTOR: [f64; 2] = [0.0, 1.0];

/// Rotation angles for the test vector and the second training vector.
///
/// Always finite; the only constructors validate their input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnglePair {
    test_angle: f64,
    training_angle: f64,
}

impl AnglePair {
    /// Validates and wraps the two angles.
    ///
    /// # Errors
    /// `ClassifierError::InvalidAngle` if either angle is NaN or infinite.
    pub fn new(test_angle: f64, training_angle: f64) -> Result<Self> {
        Ok(Self {
            test_angle: check_angle("test_angle", test_angle)?,
            training_angle: check_angle("training_angle", training_angle)?,
        })
    }

    /// The reference scenario: test vector `(-0.549, 0.836)` against the
    /// training vectors `[0, 1]` and `(0.789, 0.615)`.
    pub fn reference() -> Self {
        Self {
            test_angle: REFERENCE_TEST_ANGLE,
            training_angle: REFERENCE_TRAINING_ANGLE,
        }
    }

    /// Derives the angles that encode `test` and `training` (normalized first).
    ///
    /// The test sandwich rotates by twice its angle and the training sandwich
    /// by four times its angle, so the training angle is half the vector's phase.
    pub fn from_vectors(test: [f64; 2], training: [f64; 2]) -> Result<Self> {
        let test_phase = phase("test", test)?;
        let training_phase = phase("training", training)?;
        Self::new(test_phase, training_phase / 2.0)
    }

    pub fn test_angle(&self) -> f64 {
        self.test_angle
    }

    pub fn training_angle(&self) -> f64 {
        self.training_angle
    }

    /// The unit vector the circuit encodes for the test instance.
    pub fn test_vector(&self) -> [f64; 2] {
        let (sin, cos) = self.test_angle.sin_cos();
        [cos, sin]
    }

    /// The unit vector the circuit encodes for the second training instance.
    pub fn training_vector(&self) -> [f64; 2] {
        let (sin, cos) = (2.0 * self.training_angle).sin_cos();
        [cos, sin]
    }
}

/// Phase of a 2D vector in `[0, 2π)`; the length only has to be non-zero.
fn phase(name: &'static str, v: [f64; 2]) -> Result<f64> {
    let norm = v[0].hypot(v[1]);
    if !norm.is_finite() || norm == 0.0 {
        return Err(ClassifierError::InvalidVector { name });
    }
    Ok(v[1].atan2(v[0]).rem_euclid(TAU))
}

/// Rotates `target` about Y only in the branch where every control is |1>.
///
/// Built recursively from flips and uncontrolled rotations:
///
/// * no controls: `Ry(angle)`
/// * otherwise: `C^n X`, the sandwich for the remaining controls at
///   `-angle`, `C^n X` again, and the sandwich at `+angle`.
///
/// The net rotation is `Ry(2^n * angle)` for `n` controls; every other branch
/// sees the identity. One control gives `CX, Ry(-a), CX, Ry(a)`.
pub fn conditional_rotation(controls: &[QubitId], target: QubitId, angle: f64) -> Vec<Operation> {
    let Some((_, rest)) = controls.split_first() else {
        return vec![Operation::RotateY { target, theta: angle }];
    };
    let flip = Operation::ControlledFlip { controls: controls.to_vec(), target };

    let mut ops = vec![flip.clone()];
    ops.extend(conditional_rotation(rest, target, -angle));
    ops.push(flip);
    ops.extend(conditional_rotation(rest, target, angle));
    ops
}

/// Builds the four-qubit state-preparation circuit.
#[derive(Debug, Clone, Copy)]
pub struct StatePreparer {
    angles: AnglePair,
}

impl StatePreparer {
    pub fn new(angles: AnglePair) -> Self {
        Self { angles }
    }

    pub fn angles(&self) -> &AnglePair {
        &self.angles
    }

    /// State preparation only, ending just before the interference step.
    pub fn prepare(&self) -> Circuit {
        let AnglePair { test_angle, training_angle } = self.angles;
        debug!(test_angle, training_angle, "preparing classifier state");

        CircuitBuilder::new()
            // uniform superposition over ancilla and index
            .add_op(Operation::Hadamard { target: ANCILLA })
            .add_op(Operation::Hadamard { target: INDEX })
            // test vector, then moved into the ancilla |0> branch
            .add_ops(conditional_rotation(&[ANCILLA], DATA, test_angle))
            .add_op(Operation::Flip { target: ANCILLA })
            .add_op(Operation::Barrier)
            // first training vector [0, 1], moved into the index |0> branch
            .add_op(Operation::ControlledFlip { controls: vec![ANCILLA, INDEX], target: DATA })
            .add_op(Operation::Flip { target: INDEX })
            .add_op(Operation::Barrier)
            // second training vector
            .add_ops(conditional_rotation(&[ANCILLA, INDEX], DATA, training_angle))
            .add_op(Operation::Barrier)
            // class label follows the index
            .add_op(Operation::ControlledFlip { controls: vec![INDEX], target: CLASS })
            .add_op(Operation::Barrier)
            .build()
    }

    /// Preparation, interference and measurement of all four qubits.
    pub fn classifier_circuit(&self) -> Circuit {
        self.prepare().compose(&interference()).compose(&measurement())
    }
}

/// Validates the angles and builds the state-preparation circuit.
pub fn prepare_state(test_angle: f64, training_angle: f64) -> Result<Circuit> {
    Ok(StatePreparer::new(AnglePair::new(test_angle, training_angle)?).prepare())
}

/// Hadamard on the ancilla, interfering test and training branches.
pub fn interference() -> Circuit {
    CircuitBuilder::new()
        .add_op(Operation::Hadamard { target: ANCILLA })
        .add_op(Operation::Barrier)
        .build()
}

/// Measures every classifier qubit.
pub fn measurement() -> Circuit {
    CircuitBuilder::new()
        .add_op(Operation::Measure { targets: vec![ANCILLA, INDEX, DATA, CLASS] })
        .build()
}
