// src/simulation/mod.rs

//! Noiseless state-vector execution of a [`Circuit`].
//!
//! This is the execution collaborator of the classifier: it takes a circuit
//! and a shot count and hands back outcome counts. [`Simulator::run`] exposes
//! the final state for exact analysis.

mod results;
pub(crate) mod engine;

pub use results::MeasurementCounts;

use crate::circuits::Circuit;
use crate::core::{ClassifierError, Result, StateVector};
use crate::validation::check_normalization;
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Settings for a [`Simulator`].
#[derive(Debug, Clone, Default)]
pub struct SimulatorConfig {
    /// Fixed seed for reproducible sampling. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

/// Runs circuits on a dense state vector.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a simulator with an unseeded sampler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with explicit settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Shorthand for a simulator whose sampling is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::with_config(SimulatorConfig { seed: Some(seed) })
    }

    /// Evolves |0...0> through every unitary operation in `circuit` and
    /// returns the final state. Measurements are ignored here.
    ///
    /// # Errors
    /// * `InvalidOperation` for an empty circuit or a malformed gate.
    /// * `InvalidQubit` if a gate names a qubit outside the register.
    /// * `Unnormalized` if the final state lost unit norm.
    pub fn run(&self, circuit: &Circuit) -> Result<StateVector> {
        Ok(self.evolve(circuit)?.into_state())
    }

    /// Runs `circuit` and samples `shots` outcomes of its measured qubits.
    ///
    /// # Errors
    /// As [`Simulator::run`], plus `InvalidOperation` if the circuit measures nothing.
    pub fn execute(&self, circuit: &Circuit, shots: usize) -> Result<MeasurementCounts> {
        let measured = circuit.measured_qubits();
        if measured.is_empty() {
            return Err(ClassifierError::InvalidOperation("circuit has no measurement".to_string()));
        }
        let engine = self.evolve(circuit)?;

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        debug!(shots, seed, measured = measured.len(), "sampling measurement outcomes");
        engine.sample(&measured, shots, &mut rng)
    }

    fn evolve(&self, circuit: &Circuit) -> Result<SimulationEngine> {
        if circuit.is_empty() {
            return Err(ClassifierError::InvalidOperation("cannot simulate an empty circuit".to_string()));
        }
        let mut engine = SimulationEngine::init(circuit.width())?;
        debug!(qubits = circuit.width(), operations = circuit.len(), "simulating circuit");

        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        check_normalization(engine.state(), None)?;
        Ok(engine)
    }
}
