// src/config/mod.rs

//! Run settings for a classifier experiment.

use crate::core::constants::classifier_constants::{DEFAULT_SHOTS, REFERENCE_TEST_ANGLE, REFERENCE_TRAINING_ANGLE};
use crate::core::{ClassifierError, Result};
use crate::encoding::AnglePair;
use crate::simulation::SimulatorConfig;
use std::env;
use std::str::FromStr;

/// Environment variable overriding [`RunConfig::shots`].
pub const SHOTS_VAR: &str = "QDCLASS_SHOTS";
/// Environment variable overriding [`RunConfig::seed`].
pub const SEED_VAR: &str = "QDCLASS_SEED";
/// Environment variable overriding [`RunConfig::test_angle`].
pub const TEST_ANGLE_VAR: &str = "QDCLASS_TEST_ANGLE";
/// Environment variable overriding [`RunConfig::training_angle`].
pub const TRAINING_ANGLE_VAR: &str = "QDCLASS_TRAINING_ANGLE";

/// Everything needed for one end-to-end classifier run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of measurement shots.
    pub shots: usize,
    /// Sampling seed; `None` gives a fresh run each time.
    pub seed: Option<u64>,
    pub test_angle: f64,
    pub training_angle: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            seed: None,
            test_angle: REFERENCE_TEST_ANGLE,
            training_angle: REFERENCE_TRAINING_ANGLE,
        }
    }
}

impl RunConfig {
    /// Defaults overridden by the `QDCLASS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(shots) = parse_var(&lookup, SHOTS_VAR)? {
            config.shots = shots;
        }
        if let Some(seed) = parse_var(&lookup, SEED_VAR)? {
            config.seed = Some(seed);
        }
        if let Some(angle) = parse_var(&lookup, TEST_ANGLE_VAR)? {
            config.test_angle = angle;
        }
        if let Some(angle) = parse_var(&lookup, TRAINING_ANGLE_VAR)? {
            config.training_angle = angle;
        }
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero shots and non-finite angles.
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(ClassifierError::Config("shots must be at least 1".to_string()));
        }
        self.angles().map(|_| ())
    }

    /// The validated angle pair.
    pub fn angles(&self) -> Result<AnglePair> {
        AnglePair::new(self.test_angle, self.training_angle)
    }

    /// Simulator settings derived from this run.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig { seed: self.seed }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ClassifierError::Config(format!("{}='{}': {}", key, raw, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_scenario() -> Result<()> {
        let config = RunConfig::from_lookup(|_| None)?;
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.shots, 1024);
        assert_eq!(config.angles()?, AnglePair::reference());
        Ok(())
    }

    #[test]
    fn test_overrides_are_applied() -> Result<()> {
        let config = RunConfig::from_lookup(lookup_from(&[
            (SHOTS_VAR, "4096"),
            (SEED_VAR, " 42 "),
            (TEST_ANGLE_VAR, "0"),
            (TRAINING_ANGLE_VAR, "0.5"),
        ]))?;
        assert_eq!(config.shots, 4096);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.test_angle, 0.0);
        assert_eq!(config.simulator_config().seed, Some(42));
        Ok(())
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let err = RunConfig::from_lookup(lookup_from(&[(SHOTS_VAR, "many")])).unwrap_err();
        assert!(matches!(err, ClassifierError::Config(ref msg) if msg.contains(SHOTS_VAR)));

        let err = RunConfig::from_lookup(lookup_from(&[(SHOTS_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ClassifierError::Config(_)));

        let err = RunConfig::from_lookup(lookup_from(&[(TEST_ANGLE_VAR, "inf")])).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidAngle { name: "test_angle", .. }));
    }
}
