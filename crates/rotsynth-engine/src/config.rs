//! Synthesis oracle configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Environment variable overriding the synthesis program path.
pub const ORACLE_ENV_VAR: &str = "ROTSYNTH_ORACLE";

/// Default synthesis program, resolved relative to the working directory.
pub const DEFAULT_ORACLE_PROGRAM: &str = "./gridsynth";

/// Configuration for a process-backed synthesis oracle.
///
/// ```yaml
/// program: /opt/gridsynth/bin/gridsynth
/// args: ["-d", "10"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Synthesis program to run once per rotation.
    pub program: PathBuf,
    /// Arguments placed before the angle on every invocation.
    pub args: Vec<String>,
}

impl OracleConfig {
    /// Create a configuration for the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// Add a leading argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Parse a configuration from YAML.
    pub fn from_yaml_str(source: &str) -> EngineResult<Self> {
        let config: Self = serde_yaml_ng::from_str(source)
            .map_err(|e| EngineError::Config(format!("invalid oracle config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&source)
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(program) = lookup(ORACLE_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            self.program = PathBuf::from(program);
        }
        self
    }

    fn validate(&self) -> EngineResult<()> {
        if self.program.as_os_str().is_empty() {
            return Err(EngineError::Config("oracle program must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORACLE_PROGRAM)
    }
}
