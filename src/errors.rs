//! Error types for the todoboard application.
//!
//! The store itself never fails; these errors come from the surfaces around
//! it: input validation, configuration loading and file output.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the todoboard application.
#[derive(Error, Debug)]
pub enum TodoError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input rejected before it reached the store.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A shell line that could not be turned into a command.
    #[error("{message}")]
    CommandError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },
}
