//! pipr - install the missing imports of a Python source file.
//!
//! pipr parses one Python file, collects every module it imports, and
//! pip-installs the ones the target interpreter cannot import. It reports
//! what it installed and what failed, and can write the installed set to a
//! `requirements.txt`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and the run pipeline
//! - [`error`] - Error types and result aliases
//! - [`imports`] - Import extraction from the Python syntax tree
//! - [`installer`] - Availability probing, pip, and resolution
//! - [`report`] - Summary output and the requirements manifest
//! - [`shell`] - Subprocess execution with captured output
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use pipr::imports::extract_references;
//!
//! let refs = extract_references("from x import y\nimport abc\n", Path::new("a.py")).unwrap();
//! assert_eq!(refs.len(), 2);
//! assert_eq!(refs[0].as_str(), "x");
//! ```

pub mod cli;
pub mod error;
pub mod imports;
pub mod installer;
pub mod report;
pub mod shell;
pub mod ui;

pub use error::{PiprError, Result};
