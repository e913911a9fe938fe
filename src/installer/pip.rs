//! The package-manager capability and its pip implementation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PiprError, Result};
use crate::shell::{execute, CommandOptions, CommandResult};

use super::stream::last_non_empty_line;

static PIP_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^pip\s+(\S+)").unwrap());

static SHOW_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Version:\s*(\S+)").unwrap());

/// Captured result of one install invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    /// Everything the installer wrote to stdout.
    pub stdout: String,
    /// Everything the installer wrote to stderr.
    pub stderr: String,
}

impl InstallOutput {
    /// Whether the installer reported success.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<CommandResult> for InstallOutput {
    fn from(result: CommandResult) -> Self {
        Self {
            exit_code: result.exit_code,
            stdout: result.stdout,
            stderr: result.stderr,
        }
    }
}

/// An external tool that installs packages into the running environment.
///
/// Calls are blocking and must not overlap.
pub trait PackageManager {
    /// The installer's own version, e.g. `23.3.1`.
    fn version(&self) -> Result<String>;

    /// Install or upgrade `package` to its latest release, quietly.
    ///
    /// `Err` means the installer could not be started at all.
    fn install(&self, package: &str) -> std::io::Result<InstallOutput>;

    /// The currently installed version of `package`, if any.
    fn installed_version(&self, package: &str) -> Option<String>;
}

/// pip, driven as `<python> -m pip`.
#[derive(Debug, Clone)]
pub struct Pip {
    python: String,
    options: CommandOptions,
}

impl Pip {
    /// Use pip from the given interpreter.
    pub fn new(python: impl Into<String>) -> Self {
        // The upgrade notice is printed after errors and would become the reason line.
        let mut options = CommandOptions::default();
        options
            .env
            .insert("PIP_DISABLE_PIP_VERSION_CHECK".to_string(), "1".to_string());

        Self {
            python: python.into(),
            options,
        }
    }

    fn pip(&self, args: &[&str]) -> std::io::Result<CommandResult> {
        let mut full = vec!["-m", "pip"];
        full.extend_from_slice(args);
        execute(&self.python, &full, &self.options)
    }
}

impl PackageManager for Pip {
    fn version(&self) -> Result<String> {
        let result = self
            .pip(&["--version"])
            .map_err(|e| PiprError::InstallerUnavailable {
                message: format!("could not run {}: {}", self.python, e),
            })?;

        if !result.success {
            return Err(PiprError::InstallerUnavailable {
                message: last_non_empty_line(&result.stderr)
                    .unwrap_or("pip --version failed")
                    .to_string(),
            });
        }

        parse_pip_version(&result.stdout).ok_or_else(|| PiprError::InstallerUnavailable {
            message: format!("unrecognized version output: {}", result.stdout.trim()),
        })
    }

    fn install(&self, package: &str) -> std::io::Result<InstallOutput> {
        self.pip(&["install", package, "--upgrade", "--quiet"])
            .map(InstallOutput::from)
    }

    fn installed_version(&self, package: &str) -> Option<String> {
        let result = self.pip(&["show", package]).ok()?;
        if !result.success {
            return None;
        }
        parse_show_version(&result.stdout)
    }
}

/// Parse `pip 23.3.1 from /usr/lib/python3/dist-packages/pip (python 3.11)`.
fn parse_pip_version(output: &str) -> Option<String> {
    PIP_VERSION_REGEX
        .captures(output.trim_start())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse the `Version:` field of `pip show` output.
fn parse_show_version(output: &str) -> Option<String> {
    SHOW_VERSION_REGEX
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modern_pip_version() {
        let out = "pip 23.3.1 from /usr/lib/python3/dist-packages/pip (python 3.11)\n";
        assert_eq!(parse_pip_version(out), Some("23.3.1".to_string()));
    }

    #[test]
    fn parses_old_pip_version() {
        let out = "pip 1.5.6 from /usr/lib/python2.7/dist-packages (python 2.7)";
        assert_eq!(parse_pip_version(out), Some("1.5.6".to_string()));
    }

    #[test]
    fn rejects_unrelated_version_output() {
        assert_eq!(parse_pip_version("Python 3.11.4"), None);
    }

    #[test]
    fn parses_show_version() {
        let out = "Name: requests\nVersion: 2.31.0\nSummary: Python HTTP for Humans.\n";
        assert_eq!(parse_show_version(out), Some("2.31.0".to_string()));
    }

    #[test]
    fn show_without_version_field() {
        assert_eq!(parse_show_version("Name: requests\n"), None);
    }

    #[test]
    fn install_output_success_requires_zero() {
        let mut out = InstallOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(out.success());
        out.exit_code = Some(1);
        assert!(!out.success());
        out.exit_code = None;
        assert!(!out.success());
    }

    #[test]
    fn missing_interpreter_means_installer_unavailable() {
        let pip = Pip::new("pipr-no-such-python");
        let err = pip.version().unwrap_err();
        assert!(matches!(err, PiprError::InstallerUnavailable { .. }));
        assert!(pip.installed_version("requests").is_none());
        assert!(pip.install("requests").is_err());
    }
}
