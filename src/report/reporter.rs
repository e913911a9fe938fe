//! Summary output for a finished run.

use std::path::Path;

use crate::error::Result;
use crate::installer::ResolutionReport;
use crate::ui::UserInterface;

use super::manifest::{write_manifest, MANIFEST_FILENAME};

/// Emit one warning per module that could not be installed.
pub fn report_failed(report: &ResolutionReport, ui: &mut dyn UserInterface) {
    for (module, reason) in &report.failed {
        ui.warning(&format!(
            "Failed to handle package \"{}\" because \"{}\"",
            module, reason
        ));
    }
}

/// Summarize installed modules and write the manifest if requested.
///
/// The manifest is only written when something was installed.
pub fn report_installed(
    report: &ResolutionReport,
    write_requirements: bool,
    dir: &Path,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    if report.installed.is_empty() {
        if write_requirements {
            ui.message(&format!(
                "Did not install any new packages. Thus a {} file was not generated",
                MANIFEST_FILENAME
            ));
        } else {
            ui.message("Did not install any new packages");
        }
        return Ok(());
    }

    let installed: Vec<&str> = report.requirements().collect();
    ui.success(&format!("Missing packages installed: {}", installed.join(", ")));

    if write_requirements {
        let path = write_manifest(dir, report)?;
        ui.message(&format!("Wrote {}", path.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn report() -> ResolutionReport {
        let mut report = ResolutionReport::default();
        report
            .installed
            .insert("six".to_string(), "six==1.16.0".to_string());
        report
            .installed
            .insert("attrs".to_string(), "attrs==23.1.0".to_string());
        report.failed.insert(
            "nomodule".to_string(),
            "ERROR: No matching distribution found for nomodule".to_string(),
        );
        report
    }

    #[test]
    fn failures_become_warnings() {
        let mut ui = MockUI::new();
        report_failed(&report(), &mut ui);

        assert_eq!(
            ui.warnings(),
            ["Failed to handle package \"nomodule\" because \"ERROR: No matching distribution found for nomodule\""]
        );
    }

    #[test]
    fn installed_summary_lists_every_entry() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        report_installed(&report(), false, temp.path(), &mut ui).unwrap();

        assert_eq!(
            ui.successes(),
            ["Missing packages installed: six==1.16.0, attrs==23.1.0"]
        );
        assert!(!temp.path().join(MANIFEST_FILENAME).exists());
    }

    #[test]
    fn manifest_written_on_request() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        report_installed(&report(), true, temp.path(), &mut ui).unwrap();

        let content = std::fs::read_to_string(temp.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(content, "six==1.16.0\nattrs==23.1.0\n");
    }

    #[test]
    fn nothing_installed_without_manifest_request() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        report_installed(&ResolutionReport::default(), false, temp.path(), &mut ui).unwrap();

        assert_eq!(ui.messages(), ["Did not install any new packages"]);
    }

    #[test]
    fn nothing_installed_skips_requested_manifest() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        report_installed(&ResolutionReport::default(), true, temp.path(), &mut ui).unwrap();

        assert!(ui.messages()[0].contains("requirements.txt file was not generated"));
        assert!(!temp.path().join(MANIFEST_FILENAME).exists());
    }
}
