// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s and a builder for them.
//!
//! A `Circuit` is immutable once built: the only way to change one is to
//! build a new one, e.g. with [`Circuit::compose`].

use crate::core::QubitId;
use crate::operations::Operation;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An ordered list of operations over a set of qubits.
///
/// Analogy: a `qiskit.QuantumCircuit` without classical registers.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Every qubit named by at least one operation.
    qubits: HashSet<QubitId>,
    /// Operations in application order.
    operations: Vec<Operation>,
}

impl Circuit {
    fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
        }
    }

    fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Returns a new circuit running `self` followed by `other`.
    pub fn compose(&self, other: &Circuit) -> Circuit {
        let mut circuit = self.clone();
        for op in other.operations() {
            circuit.add_operation(op.clone());
        }
        circuit
    }

    /// The set of qubits involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// Number of qubits needed to simulate the circuit (highest index + 1).
    pub fn width(&self) -> usize {
        self.qubits.iter().map(|q| q.0 + 1).max().unwrap_or(0)
    }

    /// The operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations, barriers included.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Qubits measured anywhere in the circuit, in ascending order.
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        let mut measured: Vec<QubitId> = self
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Measure { targets } => Some(targets.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect();
        measured.sort();
        measured.dedup();
        measured
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds a `Circuit` with method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Appends a single operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Appends every operation from an iterator, in order.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.circuit.add_operation(op);
        }
        self
    }

    /// Finishes construction.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().copied().collect();
        sorted_qubits.sort();
        let num_rows = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = sorted_qubits.iter().map(|q| q.to_string().len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 11; // fits "Ry(-12.34)"
        const H_WIRE: char = '─';
        const V_WIRE: char = '│';
        let wire: String = H_WIRE.to_string().repeat(GATE_WIDTH);

        // op_grid[row][time] holds the gate or wire segment
        let mut op_grid: Vec<Vec<String>> = vec![vec![wire.clone(); num_ops]; num_rows];
        // v_connect[row][time] holds the connector drawn below a row
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total = GATE_WIDTH - slen;
                let pre = total / 2;
                let post = total - pre;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Hadamard { target }
                | Operation::Flip { target }
                | Operation::RotateY { target, .. } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate(&op.symbol());
                    }
                }
                Operation::ControlledFlip { controls, target } => {
                    let mut rows = Vec::with_capacity(controls.len() + 1);
                    for control in controls {
                        if let Some(r) = qubit_to_row.get(control) {
                            op_grid[*r][t] = format_gate("@");
                            rows.push(*r);
                        }
                    }
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate(&op.symbol());
                        rows.push(*r);
                    }
                    if let (Some(r_min), Some(r_max)) = (rows.iter().min(), rows.iter().max()) {
                        for row_vec in v_connect.iter_mut().take(*r_max).skip(*r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Operation::Barrier => {
                    for r in 0..num_rows {
                        op_grid[r][t] = format_gate(&op.symbol());
                    }
                }
                Operation::Measure { targets } => {
                    for target in targets {
                        if let Some(r) = qubit_to_row.get(target) {
                            op_grid[*r][t] = format_gate(&op.symbol());
                        }
                    }
                }
            }
        }

        writeln!(f, "Circuit[{} operations on {} qubits]", num_ops, num_rows)?;
        for r in 0..num_rows {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_rows - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let padding_needed = GATE_WIDTH - 1;
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
