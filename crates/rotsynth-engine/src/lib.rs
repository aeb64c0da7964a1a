//! Rotsynth Decomposition Engine
//!
//! This crate provides a compiler-pipeline stage that rewrites every
//! continuous single-qubit rotation into a word over the Clifford+T alphabet
//! {H, S, T, X}, while forwarding every other command unchanged.
//!
//! # Overview
//!
//! ```text
//!   upstream
//!      │  process(batch)
//!      ▼
//! ┌──────────────────────┐
//! │ DecompositionEngine  │ ◄── SynthesisOracle (axis, angle) -> "TSH…"
//! └──────────────────────┘
//!      │  send(command)      ──► MeasurementRecorder
//!      ▼
//!   CommandSink (another engine, a printer, a backend)
//! ```
//!
//! The engine keeps counters for the active register width and the number
//! of rotations seen. Synthesis is delegated to a [`SynthesisOracle`]; the
//! reference [`ProcessOracle`] runs an external program such as `gridsynth`
//! once per rotation.
//!
//! # Example
//!
//! ```rust
//! use std::f64::consts::PI;
//!
//! use rotsynth_engine::{CommandLog, DecompositionEngine, StaticOracle};
//! use rotsynth_ir::{Axis, Command, FixedGate, QubitId};
//!
//! let oracle = StaticOracle::new().with_word(Axis::Z, PI / 4.0, "TSH\n");
//! let log = CommandLog::new();
//! let mut engine = DecompositionEngine::new(oracle).with_sink(log.clone());
//!
//! engine
//!     .process([
//!         Command::allocate(QubitId(0)),
//!         Command::rz(PI / 4.0, QubitId(0)),
//!         Command::measure(QubitId(0)),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(engine.rotation_count(), 1);
//! assert_eq!(log.len(), 5);
//! assert_eq!(log.commands()[1], Command::fixed(FixedGate::H, QubitId(0)));
//! ```
//!
//! # Chaining
//!
//! [`DecompositionEngine`] is itself a [`CommandSink`], so engines can be
//! stacked. [`DecompositionEngine::availability`] asks the next stage and
//! treats a terminal stage with no opinion as capable.

pub mod config;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod sink;
pub mod stats;

pub use config::OracleConfig;
pub use engine::{DecompositionEngine, PLACEHOLDER_OUTCOME};
pub use error::{EngineError, EngineResult};
pub use oracle::{ProcessOracle, StaticOracle, SynthesisOracle};
pub use sink::{CommandLog, CommandPrinter, CommandSink, MeasurementRecorder, MeasurementRegister};
pub use stats::EngineStats;
