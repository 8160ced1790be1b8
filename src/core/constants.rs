//! Constants shared by the classifier circuit and its runs.

/// Register layout and reference values for the classifier
pub mod classifier_constants {
    use crate::core::QubitId;

    /// Number of qubits in the classifier register.
    pub const NUM_QUBITS: usize = 4;

    /// Mediates interference between the test and training branches.
    pub const ANCILLA: QubitId = QubitId(0);
    /// Selects which training instance a branch holds.
    pub const INDEX: QubitId = QubitId(1);
    /// Carries the amplitude-encoded vectors.
    pub const DATA: QubitId = QubitId(2);
    /// Carries the class label of the training instance.
    pub const CLASS: QubitId = QubitId(3);

    /// Test angle of the reference scenario.
    pub const REFERENCE_TEST_ANGLE: f64 = 4.304_175_794_876_69 / 2.0;
    /// Training angle of the reference scenario.
    pub const REFERENCE_TRAINING_ANGLE: f64 = 1.324_502_146_965_896_6 / 4.0;

    /// Shot count used when nothing else is configured.
    pub const DEFAULT_SHOTS: usize = 1024;

    /// Amplitudes with |c|^2 below this are treated as zero when sampling.
    pub const PROBABILITY_CUTOFF: f64 = 1e-12;
}
