// src/simulation/engine.rs
use crate::core::{ClassifierError, QubitId, Result, StateVector};
use crate::core::constants::classifier_constants::PROBABILITY_CUTOFF;
use crate::operations::Operation;
use crate::simulation::MeasurementCounts;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::trace;

type Matrix2 = [[Complex<f64>; 2]; 2];

/// Dense state-vector engine evolving one register through a circuit.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    num_qubits: usize,
    state: StateVector,
}

impl SimulationEngine {
    /// Starts the register in |0...0>.
    pub(crate) fn init(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(ClassifierError::InvalidOperation("cannot simulate a register of zero qubits".to_string()));
        }
        // 2^n must fit in usize
        1usize.checked_shl(num_qubits as u32).ok_or_else(|| {
            ClassifierError::InvalidOperation(format!("{} qubits overflow the state vector dimension", num_qubits))
        })?;

        Ok(Self {
            num_qubits,
            state: StateVector::zero(num_qubits),
        })
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies one unitary operation. Barriers and measurements leave the
    /// state untouched; measurement happens by sampling the final state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<()> {
        match op {
            Operation::Hadamard { target } => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                self.apply_controlled_gate(&[], *target, &[[h, h], [h, -h]])?;
            }
            Operation::Flip { target } => {
                self.apply_controlled_gate(&[], *target, &flip_matrix())?;
            }
            Operation::RotateY { target, theta } => {
                self.apply_controlled_gate(&[], *target, &rotate_y_matrix(*theta))?;
            }
            Operation::ControlledFlip { controls, target } => {
                self.apply_controlled_gate(controls, *target, &flip_matrix())?;
            }
            Operation::Barrier | Operation::Measure { .. } => {
                self.check_qubits(&op.involved_qubits())?;
            }
        }
        trace!(?op, "applied operation");
        Ok(())
    }

    /// Applies `matrix` to `target` on every basis pair where all `controls` are |1>.
    fn apply_controlled_gate(&mut self, controls: &[QubitId], target: QubitId, matrix: &Matrix2) -> Result<()> {
        self.check_qubits(controls)?;
        self.check_qubits(&[target])?;
        if controls.contains(&target) {
            return Err(ClassifierError::InvalidOperation(format!("{} is both control and target", target)));
        }
        let mut sorted = controls.to_vec();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != controls.len() {
            return Err(ClassifierError::InvalidOperation("duplicate control qubit".to_string()));
        }

        let control_mask: usize = controls.iter().map(|q| q.mask()).sum();
        let target_mask = target.mask();
        let dim = self.state.dim();
        let amplitudes = self.state.amplitudes_mut();

        for i0 in 0..dim {
            if i0 & target_mask != 0 || i0 & control_mask != control_mask {
                continue;
            }
            let i1 = i0 | target_mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    fn check_qubits(&self, qubits: &[QubitId]) -> Result<()> {
        match qubits.iter().find(|q| q.0 >= self.num_qubits) {
            Some(qubit) => Err(ClassifierError::InvalidQubit { qubit: *qubit, num_qubits: self.num_qubits }),
            None => Ok(()),
        }
    }

    /// Draws `shots` computational-basis samples from the current state and
    /// records the bits of `measured`, highest qubit first.
    pub(crate) fn sample<R: Rng + ?Sized>(
        &self,
        measured: &[QubitId],
        shots: usize,
        rng: &mut R,
    ) -> Result<MeasurementCounts> {
        self.check_qubits(measured)?;
        let mut measured = measured.to_vec();
        measured.sort_by(|a, b| b.cmp(a));

        let distribution: Vec<(usize, f64)> = self
            .state
            .amplitudes()
            .iter()
            .enumerate()
            .map(|(k, amp)| (k, amp.norm_sqr()))
            .filter(|(_, p)| *p > PROBABILITY_CUTOFF)
            .collect();
        let total: f64 = distribution.iter().map(|(_, p)| p).sum();
        let (fallback, _) = *distribution.last().ok_or(ClassifierError::Unnormalized { norm: total })?;

        let mut counts = MeasurementCounts::new();
        for _ in 0..shots {
            let x: f64 = StandardUniform.sample(rng);
            let draw = x * total;
            let mut cumulative = 0.0;
            let mut chosen = fallback;
            for (k, p) in &distribution {
                cumulative += p;
                if draw < cumulative {
                    chosen = *k;
                    break;
                }
            }
            let key: String = measured
                .iter()
                .map(|q| if chosen & q.mask() != 0 { '1' } else { '0' })
                .collect();
            counts.record(key, 1);
        }
        Ok(counts)
    }
}

fn flip_matrix() -> Matrix2 {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

/// `u3(theta, 0, 0)`: [[cos(a), -sin(a)], [sin(a), cos(a)]] with a = theta/2
fn rotate_y_matrix(theta: f64) -> Matrix2 {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos_a, 0.0), Complex::new(-sin_a, 0.0)],
        [Complex::new(sin_a, 0.0), Complex::new(cos_a, 0.0)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn q(i: usize) -> QubitId {
        QubitId(i)
    }

    fn amplitude(engine: &SimulationEngine, index: usize) -> Complex<f64> {
        engine.state().amplitudes()[index]
    }

    #[test]
    fn test_rotate_y_encodes_cos_sin() -> Result<()> {
        let mut engine = SimulationEngine::init(1)?;
        engine.apply_operation(&Operation::RotateY { target: q(0), theta: 1.0 })?;
        assert_abs_diff_eq!(amplitude(&engine, 0).re, 0.5f64.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(amplitude(&engine, 1).re, 0.5f64.sin(), epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_toffoli_needs_both_controls() -> Result<()> {
        let toffoli = Operation::ControlledFlip { controls: vec![q(0), q(1)], target: q(2) };

        let mut engine = SimulationEngine::init(3)?;
        engine.apply_operation(&Operation::Flip { target: q(0) })?;
        engine.apply_operation(&toffoli)?;
        assert_abs_diff_eq!(amplitude(&engine, 0b001).re, 1.0);

        engine.apply_operation(&Operation::Flip { target: q(1) })?;
        engine.apply_operation(&toffoli)?;
        assert_abs_diff_eq!(amplitude(&engine, 0b111).re, 1.0);
        Ok(())
    }

    #[test]
    fn test_hadamard_twice_is_identity() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        engine.apply_operation(&Operation::Hadamard { target: q(1) })?;
        assert_abs_diff_eq!(amplitude(&engine, 0b10).re, FRAC_1_SQRT_2, epsilon = 1e-12);
        engine.apply_operation(&Operation::Hadamard { target: q(1) })?;
        assert_abs_diff_eq!(amplitude(&engine, 0).re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(amplitude(&engine, 0b10).norm(), 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_rejects_out_of_range_and_overlapping_qubits() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        let err = engine.apply_operation(&Operation::Flip { target: q(5) }).unwrap_err();
        assert_eq!(err, ClassifierError::InvalidQubit { qubit: q(5), num_qubits: 2 });

        let err = engine
            .apply_operation(&Operation::ControlledFlip { controls: vec![q(1)], target: q(1) })
            .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidOperation(_)));

        assert!(SimulationEngine::init(0).is_err());
        Ok(())
    }

    #[test]
    fn test_sampling_basis_state_is_deterministic() -> Result<()> {
        let mut engine = SimulationEngine::init(4)?;
        engine.apply_operation(&Operation::Flip { target: q(3) })?;
        let mut rng = StdRng::seed_from_u64(7);
        let counts = engine.sample(&[q(0), q(1), q(2), q(3)], 50, &mut rng)?;
        assert_eq!(counts.get("1000"), 50);
        assert_eq!(counts.total(), 50);
        Ok(())
    }
}
