//! Error types for the engine crate.

use std::path::PathBuf;
use std::process::ExitStatus;

use rotsynth_ir::{Axis, IrError, QubitId};
use thiserror::Error;

/// Errors that can abort a `process` call.
///
/// None of these are retried. After any of them the engine's counters and
/// pending queue reflect the failure point and the instance should be
/// discarded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The synthesis program could not be started.
    #[error("Failed to launch synthesis oracle '{}': {source}", .program.display())]
    OracleLaunch {
        /// Program that was launched.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The synthesis oracle ran but reported failure.
    #[error("Synthesis oracle '{oracle}' failed{}: {stderr}", format_status(.status))]
    OracleFailed {
        /// Oracle or program name.
        oracle: String,
        /// Exit status, when the oracle is an external process.
        status: Option<ExitStatus>,
        /// Diagnostic output.
        stderr: String,
    },

    /// The synthesis program printed something that is not text.
    #[error("Synthesis oracle '{oracle}' produced unreadable output: {reason}")]
    OracleOutput {
        /// Oracle or program name.
        oracle: String,
        /// What was wrong with the output.
        reason: String,
    },

    /// The oracle returned a word containing an unknown token.
    #[error("Malformed decomposition for R{axis}({angle}): {source}")]
    MalformedDecomposition {
        /// Axis of the rotation being synthesized.
        axis: Axis,
        /// Angle of the rotation being synthesized.
        angle: f64,
        /// Validation failure.
        #[source]
        source: IrError,
    },

    /// Forwarding found no pending word for a rotation.
    #[error("Pending decomposition queue underflow: classification and forwarding are out of step")]
    QueueUnderflow,

    /// Deallocate of a qubit that is not allocated.
    #[error("Deallocate of {qubit} without a matching allocate")]
    CounterUnderflow {
        /// The qubit being released.
        qubit: QubitId,
    },

    /// Allocate of a qubit that is already allocated.
    #[error("Allocate of {qubit} while it is already allocated")]
    DoubleAllocation {
        /// The qubit being allocated.
        qubit: QubitId,
    },

    /// A downstream sink rejected a command.
    #[error("Sink error: {0}")]
    Sink(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command.
    #[error("Invalid command: {0}")]
    Ir(#[from] IrError),
}

/// Helper function to format an optional exit status.
#[allow(clippy::ref_option)]
fn format_status(status: &Option<ExitStatus>) -> String {
    match status {
        Some(status) => format!(" ({status})"),
        None => String::new(),
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
