//! The rotation-decomposition engine.

use std::collections::VecDeque;
use std::fmt;

use rotsynth_ir::{Command, DecompositionWord, GateKind, QubitId};
use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument, warn};

use crate::error::{EngineError, EngineResult};
use crate::oracle::SynthesisOracle;
use crate::sink::{CommandSink, MeasurementRecorder};
use crate::stats::EngineStats;

/// Outcome recorded for every measured qubit.
///
/// The engine does not simulate state, so this is a placeholder rather than
/// a measured value. Downstream consumers must not treat it as physical.
pub const PLACEHOLDER_OUTCOME: bool = false;

/// Pipeline stage replacing every rotation with a Clifford+T word.
///
/// Each batch is handled in two passes over the same commands in the same
/// order. Classification updates counters, records measurements and
/// synthesizes one word per rotation into the pending queue. Forwarding then
/// sends every command downstream, popping the queue for each rotation and
/// emitting its word in place of the rotation. A failure during
/// classification therefore forwards nothing of the batch.
///
/// Without a sink the engine is terminal: it classifies and counts, and the
/// words synthesized for the batch are dropped.
///
/// The engine is single-threaded. After any error its state reflects the
/// failure point and the instance should be discarded.
pub struct DecompositionEngine<O> {
    oracle: O,
    sink: Option<Box<dyn CommandSink>>,
    recorder: Option<Box<dyn MeasurementRecorder>>,
    pending: VecDeque<DecompositionWord>,
    live: FxHashSet<QubitId>,
    stats: EngineStats,
}

impl<O: SynthesisOracle> DecompositionEngine<O> {
    /// Create a terminal engine using `oracle` for synthesis.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            sink: None,
            recorder: None,
            pending: VecDeque::new(),
            live: FxHashSet::default(),
            stats: EngineStats::default(),
        }
    }

    /// Forward to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: impl CommandSink + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    /// Record measurement outcomes into `recorder`.
    ///
    /// Without a recorder, measurements are counted but their outcomes are
    /// dropped.
    #[must_use]
    pub fn with_recorder(mut self, recorder: impl MeasurementRecorder + 'static) -> Self {
        self.recorder = Some(Box::new(recorder));
        self
    }

    /// Check if a measurement recorder is attached.
    pub fn has_recorder(&self) -> bool {
        self.recorder.is_some()
    }

    /// Replace the downstream sink.
    pub fn set_sink(&mut self, sink: impl CommandSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Check if a downstream sink is attached.
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Get the oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Process one batch of commands, in order.
    #[instrument(skip(self, batch))]
    pub fn process(&mut self, batch: impl IntoIterator<Item = Command>) -> EngineResult<()> {
        let batch: Vec<Command> = batch.into_iter().collect();
        let rotations_before = self.stats.rotations;

        for command in &batch {
            self.classify(command)?;
        }

        let synthesized = self.stats.rotations - rotations_before;
        info!(
            "Classified batch of {} commands, {} rotations synthesized",
            batch.len(),
            synthesized
        );

        if self.sink.is_none() {
            if !self.pending.is_empty() {
                debug!("Terminal engine, dropping {} words", self.pending.len());
                self.pending.clear();
            }
            return Ok(());
        }

        for command in batch {
            self.forward(command)?;
        }

        debug!("Batch forwarded, total forwarded: {}", self.stats.forwarded);
        Ok(())
    }

    /// Number of rotations classified over the engine's lifetime.
    pub fn rotation_count(&self) -> u64 {
        self.stats.rotations
    }

    /// Whether the pipeline from this engine on can handle `command`.
    ///
    /// A terminal engine handles everything. Otherwise the sink decides, and
    /// a sink with no opinion counts as capable.
    pub fn availability(&self, command: &Command) -> bool {
        match &self.sink {
            None => true,
            Some(sink) => sink.is_available(command).unwrap_or(true),
        }
    }

    /// Currently allocated qubits.
    pub fn active_qubits(&self) -> usize {
        self.stats.active_qubits
    }

    /// Largest number of simultaneously allocated qubits.
    pub fn max_width(&self) -> usize {
        self.stats.max_width
    }

    /// Words synthesized but not yet forwarded.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Snapshot of all counters.
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    fn classify(&mut self, command: &Command) -> EngineResult<()> {
        match &command.gate {
            GateKind::Allocate => {
                for &qubit in &command.targets {
                    if !self.live.insert(qubit) {
                        return Err(EngineError::DoubleAllocation { qubit });
                    }
                    self.stats.active_qubits += 1;
                }
                self.stats.max_width = self.stats.max_width.max(self.stats.active_qubits);
            }
            GateKind::Deallocate => {
                for &qubit in &command.targets {
                    if !self.live.remove(&qubit) {
                        return Err(EngineError::CounterUnderflow { qubit });
                    }
                    self.stats.active_qubits = self
                        .stats
                        .active_qubits
                        .checked_sub(1)
                        .ok_or(EngineError::CounterUnderflow { qubit })?;
                }
            }
            GateKind::Measure => {
                self.stats.measurements += command.targets.len() as u64;
                match self.recorder.as_mut() {
                    Some(recorder) => {
                        for &qubit in &command.targets {
                            recorder.record_measurement(qubit, PLACEHOLDER_OUTCOME);
                        }
                    }
                    None => debug!(
                        "No recorder attached, dropping {} outcomes",
                        command.targets.len()
                    ),
                }
            }
            GateKind::Rotation { axis, angle } => {
                let (axis, angle) = (*axis, *angle);
                command.qubit()?;
                self.stats.rotations += 1;

                let raw = self.oracle.synthesize(axis, angle)?;
                let word = DecompositionWord::from_oracle_output(&raw).map_err(|source| {
                    warn!(
                        "{} returned a malformed word for R{}({})",
                        self.oracle.name(),
                        axis,
                        angle
                    );
                    EngineError::MalformedDecomposition {
                        axis,
                        angle,
                        source,
                    }
                })?;
                debug!("R{}({}) -> {} ({} gates)", axis, angle, word, word.len());
                self.pending.push_back(word);
            }
            GateKind::Fixed(_) | GateKind::Flush | GateKind::Other(_) => {}
        }
        Ok(())
    }

    fn forward(&mut self, command: Command) -> EngineResult<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };

        if command.gate.is_rotation() {
            let word = self.pending.pop_front().ok_or(EngineError::QueueUnderflow)?;
            let qubit = command.qubit()?;
            for gate in word.iter() {
                sink.send(Command::fixed(gate, qubit))?;
                *self.stats.emitted.entry(gate).or_insert(0) += 1;
                self.stats.forwarded += 1;
            }
        } else {
            sink.send(command)?;
            self.stats.forwarded += 1;
        }
        Ok(())
    }
}

impl<O: SynthesisOracle> CommandSink for DecompositionEngine<O> {
    fn send(&mut self, command: Command) -> EngineResult<()> {
        self.process([command])
    }

    fn is_available(&self, command: &Command) -> Option<bool> {
        Some(self.availability(command))
    }
}

impl<O> fmt::Display for DecompositionEngine<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stats.rotations)
    }
}

impl<O> fmt::Debug for DecompositionEngine<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecompositionEngine")
            .field("has_sink", &self.sink.is_some())
            .field("pending", &self.pending.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
