//! Subprocess execution with captured output.

pub mod command;

pub use command::{execute, CommandOptions, CommandResult};
