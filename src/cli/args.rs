//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

/// Interpreter used when neither `--python` nor `PIPR_PYTHON` is given.
pub const DEFAULT_PYTHON: &str = "python3";

/// pipr - pip install the missing imports of a Python file.
#[derive(Debug, Parser)]
#[command(name = "pipr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the Python file
    pub filepath: PathBuf,

    /// Generate a requirements.txt file in the current directory
    #[arg(short, long)]
    pub requirements: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Python interpreter whose environment is checked and installed into
    #[arg(long, env = "PIPR_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Print the resolution report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["pipr", "./", "-r", "-d"]).unwrap();
        assert_eq!(cli.filepath, PathBuf::from("./"));
        assert!(cli.requirements);
        assert!(cli.debug);
        assert!(!cli.json);
    }

    #[test]
    fn flags_default_off() {
        let cli = Cli::try_parse_from(["pipr", "script.py"]).unwrap();
        assert!(!cli.requirements);
        assert!(!cli.debug);
        assert!(!cli.no_color);
    }

    #[test]
    fn python_flag_overrides_default() {
        let cli = Cli::try_parse_from(["pipr", "script.py", "--python", "/opt/py/bin/python"])
            .unwrap();
        assert_eq!(cli.python, "/opt/py/bin/python");
    }

    #[test]
    fn filepath_is_required() {
        assert!(Cli::try_parse_from(["pipr"]).is_err());
    }
}
