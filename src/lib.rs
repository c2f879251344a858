//! Universal APK export from Android App Bundles.
//!
//! This library provides the pipeline behind the `export_apk_from_aab` step:
//! - Downloading a bundletool release
//! - Running `build-apks --mode=universal`, optionally signed
//! - Extracting and renaming the universal APK
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod exporter;

// Re-export commonly used types
pub use error::{CliError, Result, StepError};
