//! Resolution of module references against the running Python environment.
//!
//! This module decides, for every module a source file imports, whether it
//! is already importable, installs it with pip if it is not, and records
//! what happened.
//!
//! # Modules
//!
//! - [`pip`] - The package-manager capability and its pip implementation
//! - [`probe`] - Import probing to tell missing modules from broken ones
//! - [`resolver`] - Per-run resolution state machine and report
//! - [`stream`] - Version-dependent selection of the installer's error stream

pub mod pip;
pub mod probe;
pub mod resolver;
pub mod stream;

pub use pip::{InstallOutput, PackageManager, Pip};
pub use probe::{Availability, ModuleProbe, PythonProbe};
pub use resolver::{InstallOutcome, ResolutionReport, Resolver};
pub use stream::ErrorStream;
