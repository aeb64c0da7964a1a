//! Commands combining gates with target qubits.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::{Axis, FixedGate, GateKind};
use crate::qubit::QubitId;

/// One gate operation applied to an ordered list of qubit handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// The gate to apply.
    pub gate: GateKind,
    /// Target qubits, in order.
    pub targets: Vec<QubitId>,
}

impl Command {
    /// Create a command from a gate and its targets.
    pub fn new(gate: impl Into<GateKind>, targets: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate: gate.into(),
            targets: targets.into_iter().collect(),
        }
    }

    /// Allocate a register slot.
    pub fn allocate(qubit: QubitId) -> Self {
        Self::new(GateKind::Allocate, [qubit])
    }

    /// Release a register slot.
    pub fn deallocate(qubit: QubitId) -> Self {
        Self::new(GateKind::Deallocate, [qubit])
    }

    /// Measure a single qubit.
    pub fn measure(qubit: QubitId) -> Self {
        Self::new(GateKind::Measure, [qubit])
    }

    /// Measure several qubits in one command.
    pub fn measure_all(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::new(GateKind::Measure, qubits)
    }

    /// Continuous rotation around `axis`.
    pub fn rotation(axis: Axis, angle: f64, qubit: QubitId) -> Self {
        Self::new(GateKind::Rotation { axis, angle }, [qubit])
    }

    /// Rotation around X.
    pub fn rx(angle: f64, qubit: QubitId) -> Self {
        Self::rotation(Axis::X, angle, qubit)
    }

    /// Rotation around Y.
    pub fn ry(angle: f64, qubit: QubitId) -> Self {
        Self::rotation(Axis::Y, angle, qubit)
    }

    /// Rotation around Z.
    pub fn rz(angle: f64, qubit: QubitId) -> Self {
        Self::rotation(Axis::Z, angle, qubit)
    }

    /// A gate of the discrete alphabet.
    pub fn fixed(gate: FixedGate, qubit: QubitId) -> Self {
        Self::new(GateKind::Fixed(gate), [qubit])
    }

    /// End-of-batch marker.
    pub fn flush() -> Self {
        Self::new(GateKind::Flush, [])
    }

    /// Any other gate, passed through by the pipeline.
    pub fn other(name: impl Into<String>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::new(GateKind::Other(name.into()), qubits)
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// Get the single target of a one-qubit command.
    pub fn qubit(&self) -> IrResult<QubitId> {
        match self.targets.as_slice() {
            [q] => Ok(*q),
            targets => Err(IrError::TargetCountMismatch {
                gate_name: self.gate.name().to_string(),
                expected: 1,
                got: u32::try_from(targets.len()).unwrap_or(u32::MAX),
            }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        if self.targets.is_empty() {
            return Ok(());
        }
        f.write_str(" |")?;
        for q in &self.targets {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}
