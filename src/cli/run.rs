//! The `pipr <file>` pipeline.
//!
//! Extraction runs to completion before resolution starts, and resolution
//! finishes before anything is reported. Fatal errors abort the run before
//! any summary is printed; modules that fail to install are reported but do
//! not change the exit code.

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::error::Result;
use crate::imports::read_references;
use crate::installer::{ModuleProbe, PackageManager, Pip, PythonProbe, Resolver};
use crate::report::{report_failed, report_installed};
use crate::ui::UserInterface;

/// Installs the missing imports of one source file.
pub struct RunCommand {
    filepath: PathBuf,
    requirements: bool,
    json: bool,
    python: String,
    working_dir: PathBuf,
}

impl RunCommand {
    /// Build the command from parsed arguments.
    ///
    /// `working_dir` receives the manifest.
    pub fn new(cli: &Cli, working_dir: &Path) -> Self {
        Self {
            filepath: cli.filepath.clone(),
            requirements: cli.requirements,
            json: cli.json,
            python: cli.python.clone(),
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Run against the configured Python interpreter and its pip.
    ///
    /// Returns `Ok` whenever the run completed, even if some installs failed.
    pub fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let probe = PythonProbe::new(&self.python);
        let pip = Pip::new(&self.python);
        self.execute_with(&probe, &pip, ui)
    }

    /// Run against explicit environment capabilities.
    pub fn execute_with(
        &self,
        probe: &dyn ModuleProbe,
        package_manager: &dyn PackageManager,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let references = read_references(&self.filepath)?;
        tracing::debug!(
            "Found {} import(s) in {}",
            references.len(),
            self.filepath.display()
        );

        let mut resolver = Resolver::new(probe, package_manager);
        let report = resolver.resolve(&references)?;

        report_failed(&report, ui);
        report_installed(&report, self.requirements, &self.working_dir, ui)?;

        if self.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            ui.message(&json);
        }

        Ok(())
    }
}
