//! Error types for the export pipeline.
//!
//! Every stage (download, build-apks, unzip, rename) reports through [`Error`].
//! External command failures keep the `<command> failed (status: <code>): <output>`
//! layout so CI logs show exactly what was run and what it printed.

use std::{
    fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while exporting a universal APK.
#[derive(Error, Debug)]
pub enum Error {
    /// Catch-all error with a message.
    #[error("{0}")]
    GenericError(String),

    /// IO error without additional context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO error annotated with the operation and path involved.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        #[source]
        error: std::io::Error,
    },

    /// External process could not be started at all.
    #[error("{command} failed: {error}")]
    CommandFailed {
        /// Printable command line
        command: String,
        /// Spawn or wait error
        #[source]
        error: std::io::Error,
    },

    /// External process ran and exited unsuccessfully.
    #[error(transparent)]
    CommandExited(#[from] CommandFailure),

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// None of the download candidates answered with 200 OK.
    #[error("none of the sources returned 200 OK status: {}", sources.join(", "))]
    NoSourceAvailable {
        /// URLs that were tried, in order
        sources: Vec<String>,
    },

    /// Download base URL could not be parsed or extended.
    #[error("invalid download URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The `.apks` archive could not be read.
    #[error("invalid APK set archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A command that ran to completion with a non-zero exit status.
///
/// Rendered as `<command> failed (status: <code>): <output>`. The status clause
/// is omitted when the process was terminated without an exit code, and the
/// output clause when nothing was printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// Printable command line
    pub command: String,
    /// Exit code if the process produced one
    pub status: Option<i32>,
    /// Trimmed combined stdout and stderr
    pub output: String,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.command)?;
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        if !self.output.is_empty() {
            write!(f, ": {}", self.output)?;
        }
        Ok(())
    }
}

impl std::error::Error for CommandFailure {}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with a description of the operation and the path.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.to_path_buf(),
            error,
        })
    }
}

/// Attach a message to a failing result.
pub trait Context<T> {
    /// Converts the failure into [`Error::GenericError`] prefixed by `message`.
    fn context(self, message: &str) -> Result<T>;
}

impl<T, E: fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, message: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {}", message, e)))
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::exporter::Error::GenericError(format!($($arg)*)))
    };
}
