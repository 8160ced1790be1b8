// src/experiment/mod.rs

//! End-to-end classifier run: prepare, execute, post-select.

use crate::analysis::{PostSelection, post_select};
use crate::circuits::Circuit;
use crate::config::RunConfig;
use crate::core::Result;
use crate::encoding::StatePreparer;
use crate::simulation::{MeasurementCounts, Simulator};
use tracing::info;

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct ClassifierRun {
    /// The executed circuit, measurement included.
    pub circuit: Circuit,
    /// Raw outcome counts.
    pub counts: MeasurementCounts,
    /// Post-selected class probabilities.
    pub selection: PostSelection,
}

/// Builds the classifier circuit for `config`, samples it and post-selects.
///
/// # Errors
/// Invalid configuration, simulator failures and an empty post-selection
/// are all passed through.
pub fn run_classifier(config: &RunConfig) -> Result<ClassifierRun> {
    config.validate()?;
    let circuit = StatePreparer::new(config.angles()?).classifier_circuit();

    let simulator = Simulator::with_config(config.simulator_config());
    let counts = simulator.execute(&circuit, config.shots)?;
    let selection = post_select(&counts)?;

    info!(
        shots = config.shots,
        acceptance = selection.acceptance_ratio,
        class0 = selection.class0,
        class1 = selection.class1,
        "classifier run finished"
    );
    Ok(ClassifierRun { circuit, counts, selection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClassifierError;

    #[test]
    fn test_seeded_runs_agree() -> Result<()> {
        let config = RunConfig { seed: Some(5), shots: 256, ..RunConfig::default() };
        let a = run_classifier(&config)?;
        let b = run_classifier(&config)?;
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.selection, b.selection);
        assert_eq!(a.counts.total(), 256);
        Ok(())
    }

    #[test]
    fn test_invalid_config_fails_before_simulation() {
        let config = RunConfig { test_angle: f64::NAN, ..RunConfig::default() };
        assert!(matches!(run_classifier(&config), Err(ClassifierError::InvalidAngle { .. })));
    }
}
