//! Downstream collaborators: command sinks and measurement recorders.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use rotsynth_ir::{Command, GateKind, QubitId};
use rustc_hash::FxHashMap;

use crate::error::{EngineError, EngineResult};

/// The next stage of a pipeline.
pub trait CommandSink {
    /// Receive one forwarded command.
    fn send(&mut self, command: Command) -> EngineResult<()>;

    /// Whether this stage can handle `command`.
    ///
    /// `None` means the stage is terminal and has no opinion; upstream
    /// engines treat that as capable.
    fn is_available(&self, _command: &Command) -> Option<bool> {
        None
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn send(&mut self, command: Command) -> EngineResult<()> {
        (**self).send(command)
    }

    fn is_available(&self, command: &Command) -> Option<bool> {
        (**self).is_available(command)
    }
}

/// Sink that records every command it receives.
///
/// Clones share the same log, so a handle can be kept after the sink has
/// been handed to an engine.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Rc<RefCell<Vec<Command>>>,
}

impl CommandLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the received commands, in arrival order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }

    /// Snapshot of the received gates, in arrival order.
    pub fn gates(&self) -> Vec<GateKind> {
        self.commands.borrow().iter().map(|c| c.gate.clone()).collect()
    }

    /// Number of received commands.
    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    /// Check if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    /// Forget all received commands.
    pub fn clear(&self) {
        self.commands.borrow_mut().clear();
    }
}

impl CommandSink for CommandLog {
    fn send(&mut self, command: Command) -> EngineResult<()> {
        self.commands.borrow_mut().push(command);
        Ok(())
    }
}

/// Terminal sink printing one line per command.
#[derive(Debug)]
pub struct CommandPrinter<W: Write> {
    out: W,
}

impl<W: Write> CommandPrinter<W> {
    /// Print to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandSink for CommandPrinter<W> {
    fn send(&mut self, command: Command) -> EngineResult<()> {
        writeln!(self.out, "{command}").map_err(|e| EngineError::Sink(e.to_string()))
    }
}

/// Receiver of measurement outcomes.
pub trait MeasurementRecorder {
    /// Record the outcome of measuring `qubit`.
    fn record_measurement(&mut self, qubit: QubitId, value: bool);
}

/// Shared register of the latest outcome per qubit.
///
/// Clones share the same register.
#[derive(Debug, Clone, Default)]
pub struct MeasurementRegister {
    inner: Rc<RefCell<RegisterState>>,
}

#[derive(Debug, Default)]
struct RegisterState {
    values: FxHashMap<QubitId, bool>,
    records: usize,
}

impl MeasurementRegister {
    /// Create an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest outcome recorded for `qubit`.
    pub fn get(&self, qubit: QubitId) -> Option<bool> {
        self.inner.borrow().values.get(&qubit).copied()
    }

    /// Number of distinct measured qubits.
    pub fn len(&self) -> usize {
        self.inner.borrow().values.len()
    }

    /// Check if nothing was measured.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().values.is_empty()
    }

    /// Total number of outcomes recorded, including repeats.
    pub fn records(&self) -> usize {
        self.inner.borrow().records
    }
}

impl MeasurementRecorder for MeasurementRegister {
    fn record_measurement(&mut self, qubit: QubitId, value: bool) {
        let mut state = self.inner.borrow_mut();
        state.values.insert(qubit, value);
        state.records += 1;
    }
}
