// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{ClassifierError, QubitId, Result};
pub use state::{StateVector, basis_label};

pub mod constants;
pub use constants::classifier_constants::{ANCILLA, CLASS, DATA, INDEX, NUM_QUBITS}; // Re-export
