//! Selection of the installer output stream that carries error text.
//!
//! pip moved its error output from stdout to stderr in 6.1.0. The stream is
//! chosen once per run from the detected pip version and then applied to
//! every failed install.

use std::cmp::Ordering;

use super::pip::InstallOutput;

/// First pip release that writes errors to stderr.
pub const STDERR_PIP_VERSION: &str = "6.1.0";

/// Which captured stream holds the installer's error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStream {
    /// Errors are written to standard output (pip < 6.1.0).
    Stdout,
    /// Errors are written to standard error (pip >= 6.1.0).
    Stderr,
}

impl ErrorStream {
    /// Pick the error stream for a given installer version.
    pub fn for_installer_version(version: &str) -> Self {
        match compare_versions(version, STDERR_PIP_VERSION) {
            Ordering::Less => Self::Stdout,
            Ordering::Equal | Ordering::Greater => Self::Stderr,
        }
    }

    /// Extract a failure reason from a failed install.
    ///
    /// Uses the last non-empty line of the selected stream, falling back to
    /// the other stream and then to the exit code.
    pub fn reason(&self, output: &InstallOutput) -> String {
        let (primary, secondary) = match self {
            Self::Stdout => (&output.stdout, &output.stderr),
            Self::Stderr => (&output.stderr, &output.stdout),
        };

        last_non_empty_line(primary)
            .or_else(|| last_non_empty_line(secondary))
            .map(str::to_string)
            .unwrap_or_else(|| match output.exit_code {
                Some(code) => format!("installer exited with code {}", code),
                None => "installer was terminated by a signal".to_string(),
            })
    }
}

/// The last line of `text` that is not blank, trimmed.
pub fn last_non_empty_line(text: &str) -> Option<&str> {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
}

/// Compare dotted numeric versions, treating missing components as zero.
///
/// Each component contributes its leading digits only, so `6.1.0b1`
/// compares like `6.1.0`.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse_version = |v: &str| -> Vec<u32> {
        v.trim()
            .split('.')
            .map(|s| {
                let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    };

    let a_parts = parse_version(a);
    let b_parts = parse_version(b);
    let len = a_parts.len().max(b_parts.len());

    for i in 0..len {
        let l = a_parts.get(i).copied().unwrap_or(0);
        let r = b_parts.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(code: Option<i32>, stdout: &str, stderr: &str) -> InstallOutput {
        InstallOutput {
            exit_code: code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn modern_pip_uses_stderr() {
        assert_eq!(ErrorStream::for_installer_version("23.3.1"), ErrorStream::Stderr);
        assert_eq!(ErrorStream::for_installer_version("6.1.0"), ErrorStream::Stderr);
        assert_eq!(ErrorStream::for_installer_version("6.1"), ErrorStream::Stderr);
    }

    #[test]
    fn old_pip_uses_stdout() {
        assert_eq!(ErrorStream::for_installer_version("6.0.8"), ErrorStream::Stdout);
        assert_eq!(ErrorStream::for_installer_version("1.5.6"), ErrorStream::Stdout);
    }

    #[test]
    fn prerelease_suffix_is_ignored() {
        assert_eq!(ErrorStream::for_installer_version("6.1.0b1"), ErrorStream::Stderr);
        assert_eq!(ErrorStream::for_installer_version("6.0.dev0"), ErrorStream::Stdout);
    }

    #[test]
    fn compare_versions_orders_numerically() {
        assert_eq!(compare_versions("10.0", "9.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("6.1.0", "6.1"), Ordering::Equal);
        assert_eq!(compare_versions("6.0.8", "6.1.0"), Ordering::Less);
    }

    #[test]
    fn last_line_skips_trailing_blanks() {
        assert_eq!(last_non_empty_line("a\nb  \n\n  \n"), Some("b"));
        assert_eq!(last_non_empty_line("\n\n"), None);
        assert_eq!(last_non_empty_line(""), None);
    }

    #[test]
    fn reason_reads_selected_stream() {
        let out = output(
            Some(1),
            "progress\nstdout tail\n",
            "ERROR: Could not find a version that satisfies the requirement nomodule\nERROR: No matching distribution found for nomodule\n",
        );
        assert_eq!(
            ErrorStream::Stderr.reason(&out),
            "ERROR: No matching distribution found for nomodule"
        );
        assert_eq!(ErrorStream::Stdout.reason(&out), "stdout tail");
    }

    #[test]
    fn reason_falls_back_to_other_stream() {
        let out = output(Some(1), "only here\n", "");
        assert_eq!(ErrorStream::Stderr.reason(&out), "only here");
    }

    #[test]
    fn reason_falls_back_to_exit_code() {
        assert_eq!(
            ErrorStream::Stderr.reason(&output(Some(2), "", "\n")),
            "installer exited with code 2"
        );
        assert!(ErrorStream::Stdout
            .reason(&output(None, "", ""))
            .contains("signal"));
    }
}
