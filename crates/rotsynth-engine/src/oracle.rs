//! Synthesis oracles turning a rotation into a Clifford+T token string.
//!
//! The engine only relies on the [`SynthesisOracle`] contract: given an axis
//! and an angle, return the raw token string (operator order, optionally
//! terminated by a newline). Validation and reversal into emission order
//! happen in the engine via [`rotsynth_ir::DecompositionWord`].

use std::f64::consts::PI;
use std::path::Path;
use std::process::{Command, Stdio};

use rotsynth_ir::Axis;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::config::OracleConfig;
use crate::error::{EngineError, EngineResult};

/// Synchronous rotation synthesis.
///
/// Calls may block for as long as the synthesis takes; there is no timeout.
/// Callers needing cancellation must wrap their own oracle.
pub trait SynthesisOracle {
    /// Synthesize a rotation, returning the raw token string.
    fn synthesize(&self, axis: Axis, angle: f64) -> EngineResult<String>;

    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        "oracle"
    }
}

impl<F> SynthesisOracle for F
where
    F: Fn(Axis, f64) -> EngineResult<String>,
{
    fn synthesize(&self, axis: Axis, angle: f64) -> EngineResult<String> {
        self(axis, angle)
    }
}

/// Oracle that runs an external synthesis program once per rotation.
///
/// The program receives the configured arguments followed by the angle and
/// must print the token string on stdout. Only the angle is passed: the
/// reference program approximates z-rotations. The angle is normalized into
/// `[0, 4π)` first so the program never sees an argument starting with `-`.
#[derive(Debug, Clone)]
pub struct ProcessOracle {
    config: OracleConfig,
    name: String,
}

impl ProcessOracle {
    /// Create an oracle from a configuration.
    pub fn new(config: OracleConfig) -> Self {
        let name = config.program.display().to_string();
        Self { config, name }
    }

    /// Create an oracle running `program` with no extra arguments.
    pub fn with_program(program: impl AsRef<Path>) -> Self {
        Self::new(OracleConfig::new(program.as_ref()))
    }

    /// Get the configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }
}

impl Default for ProcessOracle {
    fn default() -> Self {
        Self::new(OracleConfig::default())
    }
}

impl SynthesisOracle for ProcessOracle {
    fn synthesize(&self, axis: Axis, angle: f64) -> EngineResult<String> {
        let program = &self.config.program;
        debug!("Launching {} for R{}({})", self.name, axis, angle);

        let output = Command::new(program)
            .args(&self.config.args)
            .arg(format_angle(angle))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| EngineError::OracleLaunch {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} exited with {}: {}", self.name, output.status, stderr);
            return Err(EngineError::OracleFailed {
                oracle: self.name.clone(),
                status: Some(output.status),
                stderr,
            });
        }

        String::from_utf8(output.stdout).map_err(|e| EngineError::OracleOutput {
            oracle: self.name.clone(),
            reason: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Format a rotation angle as a non-negative argument.
///
/// Rotations have period 4π, so the normalized angle names the same rotation.
fn format_angle(angle: f64) -> String {
    // Adding zero turns a -0.0 remainder into 0.0.
    (angle.rem_euclid(4.0 * PI) + 0.0).to_string()
}

/// In-process oracle answering from a table of precomputed words.
///
/// Keys match on the exact bit pattern of the angle.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    words: FxHashMap<(Axis, u64), String>,
}

impl StaticOracle {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw token string for a rotation.
    #[must_use]
    pub fn with_word(mut self, axis: Axis, angle: f64, raw: impl Into<String>) -> Self {
        self.insert(axis, angle, raw);
        self
    }

    /// Register the raw token string for a rotation.
    pub fn insert(&mut self, axis: Axis, angle: f64, raw: impl Into<String>) {
        self.words.insert((axis, angle.to_bits()), raw.into());
    }

    /// Number of registered rotations.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SynthesisOracle for StaticOracle {
    fn synthesize(&self, axis: Axis, angle: f64) -> EngineResult<String> {
        self.words
            .get(&(axis, angle.to_bits()))
            .cloned()
            .ok_or_else(|| EngineError::OracleFailed {
                oracle: "static".into(),
                status: None,
                stderr: format!("no word registered for R{axis}({angle})"),
            })
    }

    fn name(&self) -> &str {
        "static"
    }
}
