//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur when building or validating commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrError {
    /// A synthesis word contains a token outside the fixed gate alphabet.
    #[error("Unrecognized token '{token}' at position {position} in decomposition word")]
    UnrecognizedToken {
        /// The offending token.
        token: char,
        /// Character position in the raw oracle output.
        position: usize,
    },

    /// Command has the wrong number of target qubits.
    #[error("Gate '{gate_name}' requires {expected} target qubits, got {got}")]
    TargetCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of targets.
        expected: u32,
        /// Actual number of targets provided.
        got: u32,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
