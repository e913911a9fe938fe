//! Command-line interface for pipr.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - The extract → resolve → report pipeline behind the CLI

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::RunCommand;
