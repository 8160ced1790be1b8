// src/simulation/results.rs
use std::collections::BTreeMap;
use std::fmt;

/// Outcome counts from a sampled run.
///
/// Keys are bit strings over the measured qubits, highest qubit first, so for
/// the classifier register the first character is the class qubit and the
/// last is the ancilla.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementCounts {
    counts: BTreeMap<String, usize>,
}

impl MeasurementCounts {
    /// Creates an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `outcome`.
    pub fn record(&mut self, outcome: impl Into<String>, count: usize) {
        *self.counts.entry(outcome.into()).or_insert(0) += count;
    }

    /// Count for one outcome, zero if it never occurred.
    pub fn get(&self, outcome: &str) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Sum of all counts (the shot count for a sampled run).
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(outcome, count)` in lexicographic outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for MeasurementCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (outcome, count) in iter {
            counts.record(outcome, count);
        }
        counts
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total())?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        }
        for (outcome, count) in &self.counts {
            writeln!(f, "  {}: {}", outcome, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut counts = MeasurementCounts::new();
        counts.record("0000", 3);
        counts.record("0000", 2);
        counts.record("1010", 1);
        assert_eq!(counts.get("0000"), 5);
        assert_eq!(counts.get("1111"), 0);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_display_lists_outcomes_in_order() {
        let counts: MeasurementCounts = [("1010", 2), ("0001", 1)].into_iter().collect();
        let text = counts.to_string();
        assert!(text.starts_with("Measurement Counts (3 shots):"));
        let first = text.find("0001").unwrap();
        let second = text.find("1010").unwrap();
        assert!(first < second);
    }
}
