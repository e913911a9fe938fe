//! Reporting of a finished resolution run.
//!
//! # Modules
//!
//! - [`manifest`] - Reading and writing `requirements.txt`
//! - [`reporter`] - Summary lines for failures and installs

pub mod manifest;
pub mod reporter;

pub use manifest::{read_manifest, write_manifest, MANIFEST_FILENAME};
pub use reporter::{report_failed, report_installed};
