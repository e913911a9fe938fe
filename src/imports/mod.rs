//! Static discovery of the modules a Python source file imports.
//!
//! # Modules
//!
//! - [`extractor`] - Syntax-tree walk producing the ordered reference list

pub mod extractor;

pub use extractor::{extract_references, read_references, ModuleReference};
