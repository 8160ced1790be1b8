// src/lib.rs

//! `qdclass` - A quantum interference distance classifier
//!
//! Builds a four-qubit circuit that amplitude-encodes a test vector and two
//! labelled training vectors, lets the test and training branches interfere
//! through a Hadamard on an ancilla, samples the result on a state-vector
//! simulator and post-selects the ancilla in |0> to read off class
//! probabilities.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod encoding;
pub mod simulation;
pub mod analysis;
pub mod validation;
pub mod config;
pub mod experiment;

// Re-export the most common types for easier top-level use
pub use crate::core::{ClassifierError, QubitId, Result, StateVector};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder};
pub use encoding::{AnglePair, StatePreparer, conditional_rotation, interference, measurement, prepare_state};
pub use simulation::{MeasurementCounts, Simulator, SimulatorConfig};
pub use analysis::{PostSelection, post_select, post_select_probabilities};
pub use config::RunConfig;
pub use experiment::{ClassifierRun, run_classifier};

// Example 1: Exact post-selection for the degenerate angle pair
// With both angles zero the test vector and the second training vector are
// |0> while the first training vector is |1>, so the test vector matches
// class 1 and never overlaps class 0.
/// ```
/// use qdclass::{AnglePair, StatePreparer, Simulator, post_select_probabilities, interference, ClassifierError};
///
/// let preparer = StatePreparer::new(AnglePair::new(0.0, 0.0)?);
/// let circuit = preparer.prepare().compose(&interference());
///
/// let state = Simulator::new().run(&circuit)?;
/// let selection = post_select_probabilities(&state.probabilities())?;
///
/// println!("{}", circuit);
/// println!("{}", selection);
/// assert!((selection.acceptance_ratio - 0.75).abs() < 1e-9);
/// assert!((selection.class0 - 1.0 / 3.0).abs() < 1e-9);
/// assert!((selection.class1 - 2.0 / 3.0).abs() < 1e-9);
/// # Ok::<(), ClassifierError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Sampled run of the reference scenario
/// ```
/// use qdclass::{run_classifier, RunConfig, ClassifierError};
///
/// let config = RunConfig { seed: Some(2024), ..RunConfig::default() };
/// let run = run_classifier(&config)?;
///
/// println!("{}", run.counts);
/// println!("{}", run.selection);
/// assert_eq!(run.counts.total(), 1024);
/// assert!((run.selection.class0 + run.selection.class1 - 1.0).abs() < 1e-12);
/// assert_eq!(run.selection.predicted_class(), 0);
/// # Ok::<(), ClassifierError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
