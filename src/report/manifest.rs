//! The `requirements.txt` manifest of newly installed packages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PiprError, Result};
use crate::installer::ResolutionReport;

/// Manifest file name, written to the working directory.
pub const MANIFEST_FILENAME: &str = "requirements.txt";

/// Write one `name==version` line per installed package into `dir`.
///
/// Overwrites an existing manifest. Returns the written path.
pub fn write_manifest(dir: &Path, report: &ResolutionReport) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILENAME);
    let content: String = report
        .requirements()
        .map(|line| format!("{}\n", line))
        .collect();

    fs::write(&path, content).map_err(|e| PiprError::ManifestWrite {
        path: path.clone(),
        message: e.to_string(),
    })?;

    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Read a manifest back as its `name==version` lines, skipping blanks.
pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report_with(installed: &[(&str, &str)]) -> ResolutionReport {
        let mut report = ResolutionReport::default();
        for (name, version) in installed {
            report
                .installed
                .insert(name.to_string(), format!("{}=={}", name, version));
        }
        report
    }

    #[test]
    fn writes_one_line_per_package_in_order() {
        let temp = TempDir::new().unwrap();
        let report = report_with(&[("six", "1.16.0"), ("attrs", "23.1.0")]);

        let path = write_manifest(temp.path(), &report).unwrap();

        assert_eq!(path, temp.path().join("requirements.txt"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "six==1.16.0\nattrs==23.1.0\n"
        );
    }

    #[test]
    fn overwrites_existing_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MANIFEST_FILENAME), "old==0.1\nstale==9\n").unwrap();

        write_manifest(temp.path(), &report_with(&[("six", "1.16.0")])).unwrap();

        assert_eq!(
            read_manifest(&temp.path().join(MANIFEST_FILENAME)).unwrap(),
            ["six==1.16.0"]
        );
    }

    #[test]
    fn round_trip_matches_installed_entries() {
        let temp = TempDir::new().unwrap();
        let report = report_with(&[("requests", "2.31.0"), ("idna", "3.4")]);

        let path = write_manifest(temp.path(), &report).unwrap();
        let lines = read_manifest(&path).unwrap();

        let expected: Vec<String> = report.installed.values().cloned().collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn unwritable_directory_is_manifest_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let err = write_manifest(&missing, &report_with(&[("six", "1.16.0")])).unwrap_err();
        assert!(matches!(err, PiprError::ManifestWrite { .. }));
    }
}
