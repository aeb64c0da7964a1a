//! Gate kinds carried by commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rotation axis of a continuous single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Rotation around X.
    X,
    /// Rotation around Y.
    Y,
    /// Rotation around Z.
    Z,
}

impl Axis {
    /// Get the lowercase name of this axis.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Discrete gates of the Clifford+T alphabet produced by synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FixedGate {
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Pauli-X gate.
    X,
}

impl FixedGate {
    /// Every gate of the alphabet.
    pub const ALL: [FixedGate; 4] = [FixedGate::H, FixedGate::S, FixedGate::T, FixedGate::X];

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            FixedGate::H => "h",
            FixedGate::S => "s",
            FixedGate::T => "t",
            FixedGate::X => "x",
        }
    }

    /// The single-character token used by synthesis programs.
    #[inline]
    pub fn symbol(&self) -> char {
        match self {
            FixedGate::H => 'H',
            FixedGate::S => 'S',
            FixedGate::T => 'T',
            FixedGate::X => 'X',
        }
    }

    /// Parse a synthesis token. Tokens are case-sensitive.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'H' => Some(FixedGate::H),
            'S' => Some(FixedGate::S),
            'T' => Some(FixedGate::T),
            'X' => Some(FixedGate::X),
            _ => None,
        }
    }
}

impl fmt::Display for FixedGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The operation a command performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// Allocate a register slot.
    Allocate,
    /// Release a register slot.
    Deallocate,
    /// Measure every target qubit.
    Measure,
    /// Continuous single-qubit rotation.
    Rotation {
        /// The rotation axis.
        axis: Axis,
        /// The rotation angle in radians.
        angle: f64,
    },
    /// A gate of the discrete alphabet.
    Fixed(FixedGate),
    /// End-of-batch marker.
    Flush,
    /// Any other gate, passed through untouched.
    Other(String),
}

impl GateKind {
    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        match self {
            GateKind::Allocate => "allocate",
            GateKind::Deallocate => "deallocate",
            GateKind::Measure => "measure",
            GateKind::Rotation { axis, .. } => match axis {
                Axis::X => "rx",
                Axis::Y => "ry",
                Axis::Z => "rz",
            },
            GateKind::Fixed(g) => g.name(),
            GateKind::Flush => "flush",
            GateKind::Other(name) => name,
        }
    }

    /// Check if this is a continuous rotation.
    #[inline]
    pub fn is_rotation(&self) -> bool {
        matches!(self, GateKind::Rotation { .. })
    }

    /// Check if this is the flush marker.
    #[inline]
    pub fn is_flush(&self) -> bool {
        matches!(self, GateKind::Flush)
    }

    /// Get the axis and angle if this is a rotation.
    pub fn as_rotation(&self) -> Option<(Axis, f64)> {
        match self {
            GateKind::Rotation { axis, angle } => Some((*axis, *angle)),
            _ => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::Rotation { axis, angle } => {
                write!(f, "R{}({angle})", axis.name())
            }
            GateKind::Fixed(g) => write!(f, "{g}"),
            other => f.write_str(other.name()),
        }
    }
}

impl From<FixedGate> for GateKind {
    fn from(gate: FixedGate) -> Self {
        GateKind::Fixed(gate)
    }
}
