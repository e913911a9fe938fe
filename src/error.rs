//! Error types for pipr operations.
//!
//! This module defines [`PiprError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every variant here is fatal: the run aborts and the process exits non-zero
//! - A module that fails to install is not an error; it is recorded in the
//!   [`ResolutionReport`](crate::installer::ResolutionReport) and the run continues
//! - Use `anyhow::Error` (via `PiprError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pipr operations.
#[derive(Debug, Error)]
pub enum PiprError {
    /// Source file does not exist.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source file exists but could not be read.
    #[error("Failed to read {path}: {message}")]
    SourceRead { path: PathBuf, message: String },

    /// Source file is not valid Python.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The Python interpreter used for availability probing could not be run.
    #[error("Python interpreter '{interpreter}' is unavailable: {message}")]
    InterpreterUnavailable {
        interpreter: String,
        message: String,
    },

    /// The package manager is missing or its version could not be determined.
    #[error("Please install pip first: {message}")]
    InstallerUnavailable { message: String },

    /// The requirements manifest could not be written.
    #[error("Failed to write manifest {path}: {message}")]
    ManifestWrite { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pipr operations.
pub type Result<T> = std::result::Result<T, PiprError>;
