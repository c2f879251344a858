//! Error types for the step binary.
//!
//! Configuration problems are reported before any pipeline work starts;
//! pipeline failures carry the underlying [`crate::exporter::Error`] unchanged.

use crate::exporter;
use thiserror::Error;

/// Result type alias for step operations
pub type Result<T> = std::result::Result<T, StepError>;

/// Top-level error of a step run
#[derive(Error, Debug)]
pub enum StepError {
    /// Invalid or missing step inputs
    #[error("Configuration error: {0}")]
    Cli(#[from] CliError),

    /// bundletool could not be downloaded
    #[error("Failed to initialize bundletool: {0}")]
    ToolInit(#[source] exporter::Error),

    /// The export pipeline failed
    #[error("Failed to export apk: {0}")]
    Export(#[source] exporter::Error),

    /// The output variable could not be published
    #[error("Failed to export {key}: {source}")]
    Publish {
        /// Variable name
        key: String,
        /// Underlying failure
        source: exporter::Error,
    },
}

/// Step input errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments or input values
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Only part of the signing inputs were given
    #[error("Incomplete keystore configuration, missing: {}", missing.join(", "))]
    IncompleteKeystore {
        /// Names of the absent signing inputs
        missing: Vec<String>,
    },
}
