//! Engine statistics.

use std::fmt;

use rotsynth_ir::FixedGate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Snapshot of an engine's counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Currently allocated qubits.
    pub active_qubits: usize,
    /// Largest number of simultaneously allocated qubits.
    pub max_width: usize,
    /// Rotations classified over the engine's lifetime.
    pub rotations: u64,
    /// Measured qubits, counted once per target.
    pub measurements: u64,
    /// Fixed gates emitted by rotation expansions, per gate.
    pub emitted: FxHashMap<FixedGate, u64>,
    /// Commands forwarded downstream.
    pub forwarded: u64,
}

impl EngineStats {
    /// Number of T gates emitted by rotation expansions.
    pub fn t_count(&self) -> u64 {
        self.emitted.get(&FixedGate::T).copied().unwrap_or(0)
    }

    /// Total fixed gates emitted by rotation expansions.
    pub fn emitted_total(&self) -> u64 {
        self.emitted.values().sum()
    }
}

impl fmt::Display for EngineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max. width (number of qubits) : {}", self.max_width)?;
        writeln!(f, "Rotations decomposed          : {}", self.rotations)?;
        for gate in FixedGate::ALL {
            let count = self.emitted.get(&gate).copied().unwrap_or(0);
            if count > 0 {
                writeln!(f, "{gate} : {count}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut stats = EngineStats::default();
        assert_eq!(stats.t_count(), 0);

        stats.emitted.insert(FixedGate::T, 3);
        stats.emitted.insert(FixedGate::H, 2);
        assert_eq!(stats.t_count(), 3);
        assert_eq!(stats.emitted_total(), 5);
    }

    #[test]
    fn test_display_skips_unused_gates() {
        let mut stats = EngineStats {
            max_width: 2,
            rotations: 1,
            ..Default::default()
        };
        stats.emitted.insert(FixedGate::S, 1);

        let text = stats.to_string();
        assert!(text.contains("Max. width (number of qubits) : 2"));
        assert!(text.contains("S : 1"));
        assert!(!text.contains("T : "));
    }
}
