//! Decomposition words produced by rotation synthesis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::command::Command;
use crate::error::{IrError, IrResult};
use crate::gate::FixedGate;
use crate::qubit::QubitId;

/// A validated sequence of fixed gates replacing one rotation.
///
/// Gates are stored in emission order: the first gate is the first one
/// forwarded downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionWord {
    gates: Vec<FixedGate>,
}

impl DecompositionWord {
    /// Create a word from gates already in emission order.
    pub fn new(gates: impl IntoIterator<Item = FixedGate>) -> Self {
        Self {
            gates: gates.into_iter().collect(),
        }
    }

    /// Parse the raw token string printed by a synthesis program.
    ///
    /// A single trailing line terminator is stripped. Synthesis programs
    /// print the word in operator order, so the last token is applied first
    /// and the sequence is reversed into emission order. Any token outside
    /// the alphabet rejects the whole word.
    pub fn from_oracle_output(raw: &str) -> IrResult<Self> {
        let tokens = raw
            .strip_suffix("\r\n")
            .or_else(|| raw.strip_suffix('\n'))
            .unwrap_or(raw);

        let mut gates = tokens
            .chars()
            .enumerate()
            .map(|(position, token)| {
                FixedGate::from_symbol(token)
                    .ok_or(IrError::UnrecognizedToken { token, position })
            })
            .collect::<IrResult<Vec<_>>>()?;
        gates.reverse();

        Ok(Self { gates })
    }

    /// Gates in emission order.
    pub fn gates(&self) -> &[FixedGate] {
        &self.gates
    }

    /// Iterate over gates in emission order.
    pub fn iter(&self) -> impl Iterator<Item = FixedGate> + '_ {
        self.gates.iter().copied()
    }

    /// Number of gates in the word.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the word is empty (identity rotation).
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Number of T gates in the word.
    pub fn t_count(&self) -> usize {
        self.gates.iter().filter(|g| **g == FixedGate::T).count()
    }

    /// Build one command per gate, all targeting `qubit`.
    pub fn to_commands(&self, qubit: QubitId) -> Vec<Command> {
        self.iter().map(|g| Command::fixed(g, qubit)).collect()
    }
}

impl fmt::Display for DecompositionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gate in &self.gates {
            write!(f, "{gate}")?;
        }
        Ok(())
    }
}
