// src/analysis/mod.rs

//! Post-selection of classifier outcomes on the ancilla reading |0>.
//!
//! Outcome keys list the class qubit first and the ancilla last. Shots with
//! the ancilla in |1> are discarded; the remaining shots are split by the
//! class bit.

use crate::core::{ClassifierError, Result};
use crate::simulation::MeasurementCounts;
use crate::validation::{check_outcome, check_weight};
use std::fmt;
use tracing::{debug, warn};

/// Acceptance ratios below this are reported with a warning.
const LOW_ACCEPTANCE: f64 = 0.1;

/// Outcome of post-selecting on the ancilla.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostSelection {
    /// Fraction of the total weight that survived post-selection.
    pub acceptance_ratio: f64,
    /// Probability of class 0 among the surviving weight.
    pub class0: f64,
    /// Probability of class 1 among the surviving weight.
    pub class1: f64,
    /// Surviving weight (shots, or probability mass).
    pub accepted: f64,
    /// Total weight presented to the analyzer.
    pub total: f64,
}

impl PostSelection {
    /// The more likely class; ties go to class 0.
    pub fn predicted_class(&self) -> u8 {
        if self.class1 > self.class0 { 1 } else { 0 }
    }
}

impl fmt::Display for PostSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Post-selection:")?;
        writeln!(f, "  Acceptance ratio: {:.4} ({} of {})", self.acceptance_ratio, self.accepted, self.total)?;
        writeln!(f, "  P(class 0):       {:.4}", self.class0)?;
        writeln!(f, "  P(class 1):       {:.4}", self.class1)?;
        writeln!(f, "  Predicted class:  {}", self.predicted_class())
    }
}

/// Post-selects sampled counts.
///
/// # Errors
/// * `MalformedOutcome` if any key is not a four-bit string.
/// * `NoValidSamples` if no weight has the ancilla in |0>.
pub fn post_select(counts: &MeasurementCounts) -> Result<PostSelection> {
    aggregate(counts.iter().map(|(outcome, count)| (outcome, count as f64)))
}

/// Post-selects an exact distribution, e.g. [`crate::StateVector::probabilities`].
///
/// # Errors
/// As [`post_select`], plus `InvalidWeight` for a negative or non-finite probability.
pub fn post_select_probabilities(probabilities: &[(String, f64)]) -> Result<PostSelection> {
    aggregate(probabilities.iter().map(|(outcome, p)| (outcome.as_str(), *p)))
}

fn aggregate<'a, I>(weights: I) -> Result<PostSelection>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut total = 0.0;
    let mut class_weight = [0.0f64; 2];

    for (outcome, weight) in weights {
        check_outcome(outcome)?;
        let weight = check_weight(outcome, weight)?;
        total += weight;
        if outcome.ends_with('0') {
            let class = usize::from(outcome.starts_with('1'));
            class_weight[class] += weight;
        }
    }

    let accepted = class_weight[0] + class_weight[1];
    if !(accepted > 0.0) {
        return Err(ClassifierError::NoValidSamples { total });
    }

    let selection = PostSelection {
        acceptance_ratio: accepted / total,
        class0: class_weight[0] / accepted,
        class1: class_weight[1] / accepted,
        accepted,
        total,
    };
    debug!(
        acceptance = selection.acceptance_ratio,
        class0 = selection.class0,
        class1 = selection.class1,
        "post-selection complete"
    );
    if selection.acceptance_ratio < LOW_ACCEPTANCE {
        warn!(acceptance = selection.acceptance_ratio, "few samples survived post-selection");
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts_are_split_by_class_bit() -> Result<()> {
        let counts: MeasurementCounts =
            [("0000", 30), ("0100", 10), ("1010", 60), ("0001", 50), ("1111", 50)].into_iter().collect();
        let selection = post_select(&counts)?;

        assert_relative_eq!(selection.acceptance_ratio, 100.0 / 200.0);
        assert_relative_eq!(selection.class0, 0.4);
        assert_relative_eq!(selection.class1, 0.6);
        assert_eq!(selection.predicted_class(), 1);
        Ok(())
    }

    #[test]
    fn test_everything_rejected_is_an_error() {
        let counts: MeasurementCounts = [("0001", 12), ("1011", 4)].into_iter().collect();
        assert_eq!(post_select(&counts), Err(ClassifierError::NoValidSamples { total: 16.0 }));
    }

    #[test]
    fn test_empty_counts_are_an_error() {
        assert_eq!(
            post_select(&MeasurementCounts::new()),
            Err(ClassifierError::NoValidSamples { total: 0.0 })
        );
    }

    #[test]
    fn test_malformed_key_is_rejected() {
        let counts: MeasurementCounts = [("000", 5)].into_iter().collect();
        assert!(matches!(post_select(&counts), Err(ClassifierError::MalformedOutcome { .. })));
    }

    #[test]
    fn test_probabilities_use_same_rules() -> Result<()> {
        let probabilities = vec![("0000".to_string(), 0.25), ("1000".to_string(), 0.25), ("0101".to_string(), 0.5)];
        let selection = post_select_probabilities(&probabilities)?;
        assert_relative_eq!(selection.acceptance_ratio, 0.5);
        assert_relative_eq!(selection.class0, 0.5);
        assert_eq!(selection.predicted_class(), 0);
        Ok(())
    }

    #[test]
    fn test_nan_probability_is_rejected() {
        let probabilities = vec![("0000".to_string(), 0.5), ("1000".to_string(), f64::NAN)];
        match post_select_probabilities(&probabilities) {
            Err(ClassifierError::InvalidWeight { outcome, weight }) => {
                assert_eq!(outcome, "1000");
                assert!(weight.is_nan());
            }
            other => panic!("expected InvalidWeight, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_probability_is_rejected() {
        let probabilities = vec![("0000".to_string(), 0.5), ("0001".to_string(), -0.4)];
        assert_eq!(
            post_select_probabilities(&probabilities),
            Err(ClassifierError::InvalidWeight { outcome: "0001".to_string(), weight: -0.4 })
        );
    }

    #[test]
    fn test_rejected_probability_mass_is_reported_as_weight() {
        let probabilities = vec![("0001".to_string(), 0.75), ("1011".to_string(), 0.25)];
        let err = post_select_probabilities(&probabilities).unwrap_err();
        assert_eq!(err, ClassifierError::NoValidSamples { total: 1.0 });
        assert!(!err.to_string().contains("shots"));
    }

    #[test]
    fn test_display_reports_probabilities() -> Result<()> {
        let counts: MeasurementCounts = [("0000", 1), ("1000", 3)].into_iter().collect();
        let text = post_select(&counts)?.to_string();
        assert!(text.contains("Acceptance ratio: 1.0000"));
        assert!(text.contains("P(class 1):       0.7500"));
        Ok(())
    }

    mod post_select_proptest {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn outcome_counts()(
                entries in prop::collection::btree_map("[01]{4}", 1usize..1000, 0..16)
            ) -> MeasurementCounts {
                entries.into_iter().collect()
            }
        }

        proptest! {
            /// Class probabilities sum to one and the acceptance ratio stays in [0, 1].
            #[test]
            fn prop_post_selection_is_a_distribution(counts in outcome_counts()) {
                let survivors = counts.iter().any(|(outcome, _)| outcome.ends_with('0'));
                match post_select(&counts) {
                    Ok(selection) => {
                        prop_assert!(survivors);
                        prop_assert!((selection.class0 + selection.class1 - 1.0).abs() < 1e-12);
                        prop_assert!((0.0..=1.0).contains(&selection.acceptance_ratio));
                        prop_assert!((0.0..=1.0).contains(&selection.class0));
                    }
                    Err(ClassifierError::NoValidSamples { total }) => {
                        prop_assert!(!survivors);
                        prop_assert_eq!(total, counts.total() as f64);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
                }
            }
        }
    }
}
