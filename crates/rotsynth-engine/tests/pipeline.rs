//! Integration tests for rotation decomposition inside a pipeline.
//!
//! These tests drive the engine the way a front end would: successive
//! batches of commands, with a recording sink standing in for the backend.

use std::f64::consts::PI;

use rotsynth_engine::{
    CommandLog, CommandPrinter, DecompositionEngine, EngineError, MeasurementRegister,
    PLACEHOLDER_OUTCOME, StaticOracle,
};
use rotsynth_ir::{Axis, Command, FixedGate, GateKind, QubitId};

fn h(q: u32) -> Command {
    Command::fixed(FixedGate::H, QubitId(q))
}

fn s(q: u32) -> Command {
    Command::fixed(FixedGate::S, QubitId(q))
}

fn t(q: u32) -> Command {
    Command::fixed(FixedGate::T, QubitId(q))
}

fn x(q: u32) -> Command {
    Command::fixed(FixedGate::X, QubitId(q))
}

// ============================================================================
// Allocate, rotate, measure
// ============================================================================

#[test]
fn test_rz_quarter_pi_scenario() {
    let oracle = StaticOracle::new().with_word(Axis::Z, PI / 4.0, "TSH\n");
    let log = CommandLog::new();
    let register = MeasurementRegister::new();
    let mut engine = DecompositionEngine::new(oracle)
        .with_sink(log.clone())
        .with_recorder(register.clone());

    engine
        .process([
            Command::allocate(QubitId(0)),
            Command::allocate(QubitId(1)),
            Command::rz(PI / 4.0, QubitId(0)),
            Command::measure(QubitId(0)),
        ])
        .unwrap();

    assert_eq!(
        log.commands(),
        vec![
            Command::allocate(QubitId(0)),
            Command::allocate(QubitId(1)),
            h(0),
            s(0),
            t(0),
            Command::measure(QubitId(0)),
        ]
    );
    assert_eq!(engine.active_qubits(), 2);
    assert_eq!(engine.rotation_count(), 1);
    assert_eq!(register.records(), 1);
    assert_eq!(register.get(QubitId(0)), Some(PLACEHOLDER_OUTCOME));
    assert_eq!(engine.to_string(), "1");
}

// ============================================================================
// FIFO discipline across interleaved commands and batches
// ============================================================================

#[test]
fn test_expansions_follow_rotation_order() {
    let oracle = StaticOracle::new()
        .with_word(Axis::Z, 0.1, "TH")
        .with_word(Axis::X, 0.2, "SX");
    let log = CommandLog::new();
    let mut engine = DecompositionEngine::new(oracle).with_sink(log.clone());

    engine
        .process([
            Command::rz(0.1, QubitId(0)),
            Command::other("cx", [QubitId(0), QubitId(1)]),
            Command::rx(0.2, QubitId(1)),
            Command::measure(QubitId(1)),
        ])
        .unwrap();

    assert_eq!(
        log.commands(),
        vec![
            h(0),
            t(0),
            Command::other("cx", [QubitId(0), QubitId(1)]),
            x(1),
            s(1),
            Command::measure(QubitId(1)),
        ]
    );
    assert_eq!(engine.pending(), 0);
}

#[test]
fn test_state_persists_across_batches() {
    let oracle = StaticOracle::new().with_word(Axis::Z, 0.3, "T\n");
    let log = CommandLog::new();
    let mut engine = DecompositionEngine::new(oracle).with_sink(log.clone());

    engine.process([Command::allocate(QubitId(0))]).unwrap();
    engine.process([Command::rz(0.3, QubitId(0)), Command::flush()]).unwrap();
    engine
        .process([Command::rz(0.3, QubitId(0)), Command::deallocate(QubitId(0))])
        .unwrap();

    assert_eq!(engine.rotation_count(), 2);
    assert_eq!(engine.active_qubits(), 0);
    assert_eq!(engine.max_width(), 1);
    assert_eq!(
        log.gates(),
        vec![
            GateKind::Allocate,
            GateKind::Fixed(FixedGate::T),
            GateKind::Flush,
            GateKind::Fixed(FixedGate::T),
            GateKind::Deallocate,
        ]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unrecognized_token_aborts_forwarding() {
    let oracle = StaticOracle::new()
        .with_word(Axis::Z, 0.1, "T")
        .with_word(Axis::Z, 0.2, "Z");
    let log = CommandLog::new();
    let mut engine = DecompositionEngine::new(oracle).with_sink(log.clone());

    let err = engine
        .process([
            Command::allocate(QubitId(0)),
            Command::rz(0.1, QubitId(0)),
            Command::rz(0.2, QubitId(0)),
            Command::measure(QubitId(0)),
        ])
        .unwrap_err();

    assert!(matches!(err, EngineError::MalformedDecomposition { .. }));
    assert!(log.is_empty());
}

#[test]
fn test_unmatched_deallocate_is_not_forwarded() {
    let log = CommandLog::new();
    let mut engine = DecompositionEngine::new(StaticOracle::new()).with_sink(log.clone());

    let err = engine.process([Command::deallocate(QubitId(0))]).unwrap_err();
    assert!(matches!(err, EngineError::CounterUnderflow { qubit: QubitId(0) }));
    assert!(log.is_empty());
}

// ============================================================================
// Chained engines
// ============================================================================

#[test]
fn test_chained_engines() {
    let log = CommandLog::new();
    let inner = DecompositionEngine::new(StaticOracle::new()).with_sink(log.clone());
    let outer_oracle = StaticOracle::new().with_word(Axis::Y, 0.7, "HS");
    let mut outer = DecompositionEngine::new(outer_oracle).with_sink(inner);

    outer
        .process([Command::allocate(QubitId(2)), Command::ry(0.7, QubitId(2))])
        .unwrap();

    // The inner engine sees only fixed gates, so its oracle is never asked.
    assert_eq!(
        log.commands(),
        vec![Command::allocate(QubitId(2)), s(2), h(2)]
    );
    assert_eq!(outer.rotation_count(), 1);
    assert!(outer.availability(&Command::rz(0.1, QubitId(0))));
}

#[test]
fn test_printer_sink() {
    let oracle = StaticOracle::new().with_word(Axis::Z, 0.5, "TH\n");
    let mut engine =
        DecompositionEngine::new(oracle).with_sink(CommandPrinter::new(std::io::sink()));

    engine
        .process([Command::allocate(QubitId(0)), Command::rz(0.5, QubitId(0))])
        .unwrap();
    assert_eq!(engine.stats().forwarded, 3);
}

#[test]
fn test_stats_snapshot_serializes() {
    let oracle = StaticOracle::new().with_word(Axis::Z, 0.5, "TTH\n");
    let mut engine = DecompositionEngine::new(oracle).with_sink(CommandLog::new());

    engine
        .process([Command::allocate(QubitId(0)), Command::rz(0.5, QubitId(0))])
        .unwrap();

    let json = serde_json::to_value(engine.stats()).unwrap();
    assert_eq!(json["rotations"], 1);
    assert_eq!(json["max_width"], 1);
    assert_eq!(json["emitted"]["T"], 2);
    assert_eq!(json["emitted"]["H"], 1);
    assert_eq!(engine.stats().t_count(), 2);
}

// ============================================================================
// External synthesis program
// ============================================================================

#[cfg(unix)]
#[test]
fn test_process_oracle_end_to_end() {
    use rotsynth_engine::{OracleConfig, ProcessOracle};

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("gridsynth.sh");
    std::fs::write(&script, "echo SHT\n").unwrap();

    let oracle =
        ProcessOracle::new(OracleConfig::new("/bin/sh").with_arg(script.display().to_string()));
    let log = CommandLog::new();
    let mut engine = DecompositionEngine::new(oracle).with_sink(log.clone());

    engine.process([Command::rz(PI / 8.0, QubitId(0))]).unwrap();
    assert_eq!(log.commands(), vec![t(0), h(0), s(0)]);
}
