//! Reconciling declared imports with the running environment.
//!
//! The `Resolver` walks a reference list in order, probes each distinct
//! top-level module once, and installs the missing ones. Outcomes are cached
//! per run so a module referenced many times costs one probe and at most one
//! installer invocation.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::imports::ModuleReference;

use super::pip::PackageManager;
use super::probe::{Availability, ModuleProbe};
use super::stream::ErrorStream;

/// Terminal classification of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Already importable; nothing done.
    AlreadySatisfied,
    /// Was missing and the installer succeeded.
    Installed {
        /// Version reported by the package index after install.
        resolved_version: String,
    },
    /// Was missing and could not be installed.
    Failed {
        /// Last diagnostic line from the installer.
        reason: String,
    },
    /// Present but raised on import; neither installed nor reported.
    Skipped,
}

/// Failed and installed modules of one run, in the order they were classified.
///
/// Keys are top-level module names. The two maps never share a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    /// Module name to failure reason.
    pub failed: IndexMap<String, String>,
    /// Module name to `name==version` requirement line.
    pub installed: IndexMap<String, String>,
}

impl ResolutionReport {
    /// Whether the run neither installed nor failed anything.
    pub fn is_empty(&self) -> bool {
        self.failed.is_empty() && self.installed.is_empty()
    }

    /// The `name==version` lines, in install order.
    pub fn requirements(&self) -> impl Iterator<Item = &str> {
        self.installed.values().map(String::as_str)
    }

    fn record(&mut self, module: &str, outcome: &InstallOutcome) {
        match outcome {
            InstallOutcome::Installed { resolved_version } => {
                self.installed
                    .insert(module.to_string(), format!("{}=={}", module, resolved_version));
            }
            InstallOutcome::Failed { reason } => {
                self.failed.insert(module.to_string(), reason.clone());
            }
            InstallOutcome::AlreadySatisfied | InstallOutcome::Skipped => {}
        }
    }
}

/// Probes and installs the modules a source file references.
///
/// Use one resolver per run: the installer's error stream and per-module
/// outcomes are remembered for its lifetime.
pub struct Resolver<'a> {
    probe: &'a dyn ModuleProbe,
    package_manager: &'a dyn PackageManager,
    error_stream: Option<ErrorStream>,
    outcomes: HashMap<String, InstallOutcome>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the given environment capabilities.
    pub fn new(probe: &'a dyn ModuleProbe, package_manager: &'a dyn PackageManager) -> Self {
        Self {
            probe,
            package_manager,
            error_stream: None,
            outcomes: HashMap::new(),
        }
    }

    /// Use a fixed error stream instead of detecting it from the installer version.
    pub fn with_error_stream(mut self, stream: ErrorStream) -> Self {
        self.error_stream = Some(stream);
        self
    }

    /// Resolve every reference, in order.
    ///
    /// Per-module install failures are recorded in the report. `Err` is
    /// returned only when the probe or the installer is unusable altogether.
    pub fn resolve(&mut self, references: &[ModuleReference]) -> Result<ResolutionReport> {
        let mut report = ResolutionReport::default();

        for reference in references {
            let module = reference.top_level();
            if self.outcomes.contains_key(module) {
                tracing::debug!("{} already handled, skipping", reference);
                continue;
            }

            let outcome = self.resolve_one(module)?;
            tracing::debug!("{} -> {:?}", module, outcome);
            report.record(module, &outcome);
            self.outcomes.insert(module.to_string(), outcome);
        }

        Ok(report)
    }

    /// The outcome recorded for a top-level module, if it has been resolved.
    pub fn outcome(&self, module: &str) -> Option<&InstallOutcome> {
        self.outcomes.get(module)
    }

    fn resolve_one(&mut self, module: &str) -> Result<InstallOutcome> {
        match self.probe.probe(module)? {
            Availability::Available => Ok(InstallOutcome::AlreadySatisfied),
            Availability::Broken { message } => {
                tracing::debug!("Ignoring {}: raised on import: {}", module, message);
                Ok(InstallOutcome::Skipped)
            }
            Availability::Missing => self.install(module),
        }
    }

    fn install(&mut self, module: &str) -> Result<InstallOutcome> {
        let stream = self.error_stream()?;

        tracing::info!("Installing missing package {}", module);
        let output = match self.package_manager.install(module) {
            Ok(output) => output,
            Err(e) => {
                return Ok(InstallOutcome::Failed {
                    reason: format!("could not start installer: {}", e),
                })
            }
        };

        if !output.success() {
            return Ok(InstallOutcome::Failed {
                reason: stream.reason(&output),
            });
        }

        Ok(match self.package_manager.installed_version(module) {
            Some(resolved_version) => InstallOutcome::Installed { resolved_version },
            None => InstallOutcome::Failed {
                reason: "installed but version could not be determined".to_string(),
            },
        })
    }

    fn error_stream(&mut self) -> Result<ErrorStream> {
        if let Some(stream) = self.error_stream {
            return Ok(stream);
        }

        let version = self.package_manager.version()?;
        let stream = ErrorStream::for_installer_version(&version);
        tracing::debug!("pip {} reports errors on {:?}", version, stream);
        self.error_stream = Some(stream);
        Ok(stream)
    }
}
