//! Rotsynth Command Model
//!
//! This crate provides the value types that flow through a rotsynth compiler
//! pipeline. Every stage of the pipeline receives and forwards [`Command`]s,
//! one batch at a time.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] is an opaque handle to one register slot
//! - **Gates**: [`GateKind`] is a closed tagged union covering register
//!   bookkeeping (allocate, deallocate, measure), continuous [`Axis`]
//!   rotations, the discrete [`FixedGate`] alphabet and the flush marker
//! - **Commands**: [`Command`] pairs a gate with its ordered target qubits
//! - **Decomposition words**: [`DecompositionWord`] is a validated sequence
//!   of fixed gates produced by a synthesis oracle for one rotation
//!
//! # Example: Expanding a Rotation
//!
//! ```rust
//! use rotsynth_ir::{Command, DecompositionWord, FixedGate, QubitId};
//!
//! let rz = Command::rz(0.785, QubitId(0));
//! assert!(rz.gate.is_rotation());
//!
//! // Oracle output is read back to front.
//! let word = DecompositionWord::from_oracle_output("TSH\n").unwrap();
//! assert_eq!(word.gates(), &[FixedGate::H, FixedGate::S, FixedGate::T]);
//!
//! let expansion = word.to_commands(QubitId(0));
//! assert_eq!(expansion.len(), 3);
//! assert_eq!(expansion[0], Command::fixed(FixedGate::H, QubitId(0)));
//! ```
//!
//! # Gate Alphabet
//!
//! | Gate | Kind | Description |
//! |------|------|-------------|
//! | `allocate` / `deallocate` | bookkeeping | Register slot lifetime |
//! | `measure` | bookkeeping | Measurement of every target |
//! | `Rx`, `Ry`, `Rz` | rotation | Continuous single-qubit rotation |
//! | `H`, `S`, `T`, `X` | fixed | Clifford+T alphabet |
//! | `flush` | marker | End-of-batch signal |

pub mod command;
pub mod error;
pub mod gate;
pub mod qubit;
pub mod word;

pub use command::Command;
pub use error::{IrError, IrResult};
pub use gate::{Axis, FixedGate, GateKind};
pub use qubit::QubitId;
pub use word::DecompositionWord;
