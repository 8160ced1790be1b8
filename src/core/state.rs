// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

use super::constants::classifier_constants::PROBABILITY_CUTOFF;

/// Amplitudes of an `n`-qubit register over the computational basis.
///
/// Index `k` holds the amplitude of the basis state whose bit `q` is the
/// value of qubit `q`. Formatting `k` as an `n`-digit binary string therefore
/// lists the highest qubit first and qubit 0 last.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates the all-zero basis state |0...0>.
    pub fn zero(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); 1usize << num_qubits];
        amplitudes[0] = Complex::one();
        Self { num_qubits, amplitudes }
    }

    /// Wraps raw amplitudes. The length must be `2^num_qubits`.
    #[cfg(test)]
    pub(crate) fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex<f64>>) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self { num_qubits, amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability of each basis state with non-negligible weight, keyed by
    /// its bit string.
    pub fn probabilities(&self) -> Vec<(String, f64)> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter_map(|(k, amp)| {
                let p = amp.norm_sqr();
                (p > PROBABILITY_CUTOFF).then(|| (basis_label(k, self.num_qubits), p))
            })
            .collect()
    }
}

/// Formats a basis index as a bit string, highest qubit first.
pub fn basis_label(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        let mut first = true;
        for (k, c) in self.amplitudes.iter().enumerate() {
            if c.norm_sqr() <= PROBABILITY_CUTOFF {
                continue;
            }
            write!(f, "{}{:.4}|{}>", if first { "" } else { " + " }, c, basis_label(k, self.num_qubits))?;
            first = false;
        }
        write!(f, "]")
    }
}
