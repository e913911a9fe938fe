//! Availability probing for Python modules.
//!
//! A module is probed by importing it in a fresh interpreter process. The
//! probe distinguishes a module that is absent from one that is present but
//! raises while initializing; only the former is worth installing.

use crate::error::{PiprError, Result};
use crate::shell::{execute, CommandOptions};

use super::stream::last_non_empty_line;

/// Exit code the snippet uses when the module itself is not installed.
const MISSING_EXIT_CODE: i32 = 10;

/// Imports `sys.argv[1]` and reports the outcome through the exit code.
///
/// Only a `ModuleNotFoundError` naming the probed module itself counts as
/// missing; an `ImportError` raised while the module initializes does not.
const PROBE_SNIPPET: &str = "\
import sys
name = sys.argv[1]
try:
    __import__(name)
except ModuleNotFoundError as exc:
    if exc.name == name:
        sys.stderr.write(str(exc))
        sys.exit(10)
    sys.stderr.write(repr(exc))
    sys.exit(11)
except Exception as exc:
    sys.stderr.write(repr(exc))
    sys.exit(11)
";

/// Whether a module can be imported in the target environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Imports cleanly.
    Available,
    /// Not installed.
    Missing,
    /// Present but failed to import, including an `ImportError` from inside it.
    Broken {
        /// Last line of the interpreter's diagnostic output.
        message: String,
    },
}

/// Answers "is module X importable right now".
pub trait ModuleProbe {
    /// Probe a single top-level module.
    ///
    /// `Err` means the probe itself could not run.
    fn probe(&self, module: &str) -> Result<Availability>;
}

/// Probes modules with a Python interpreter subprocess.
#[derive(Debug, Clone)]
pub struct PythonProbe {
    python: String,
    options: CommandOptions,
}

impl PythonProbe {
    /// Probe with the given interpreter (e.g. `python3`).
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            options: CommandOptions::default(),
        }
    }

    /// Set an environment variable for the probing interpreter.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.options.env.insert(key.to_string(), value.to_string());
        self
    }
}

impl ModuleProbe for PythonProbe {
    fn probe(&self, module: &str) -> Result<Availability> {
        let result = execute(
            &self.python,
            &["-c", PROBE_SNIPPET, module],
            &self.options,
        )
        .map_err(|e| PiprError::InterpreterUnavailable {
            interpreter: self.python.clone(),
            message: e.to_string(),
        })?;

        Ok(classify(result.exit_code, &result.stderr))
    }
}

/// Map the probe's exit code to an availability.
fn classify(exit_code: Option<i32>, stderr: &str) -> Availability {
    match exit_code {
        Some(0) => Availability::Available,
        Some(MISSING_EXIT_CODE) => Availability::Missing,
        _ => Availability::Broken {
            message: last_non_empty_line(stderr)
                .unwrap_or("import terminated abnormally")
                .to_string(),
        },
    }
}
