//! Universal APK export pipeline.
//!
//! Turns an Android App Bundle into a single installable APK with bundletool:
//! download the jar, run `build-apks --mode=universal`, unzip the APK set,
//! and rename the result after the input bundle.
//!
//! # Example
//!
//! ```no_run
//! use export_apk_from_aab::exporter::{Exporter, ToolLocator, DEFAULT_RELEASES_URL};
//! use std::path::Path;
//!
//! # async fn example() -> export_apk_from_aab::exporter::Result<()> {
//! let locator = ToolLocator::new(DEFAULT_RELEASES_URL, "java")?;
//! let tool = locator.resolve(&semver::Version::new(0, 15, 0)).await?;
//!
//! let exporter = Exporter::new(tool);
//! let apk = exporter
//!     .export_universal_apk(Path::new("app-release.aab"), None)
//!     .await?;
//! println!("Exported {}", apk.persist().display());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`apk`] - Export orchestration, archive handling, output naming
//! - [`bundletool`] - Tool download, command construction, signing config
//! - [`command`] - External process execution
//! - [`error`] - Error types and context helpers
//! - [`utils`] - HTTP, checksum, and file system helpers

pub mod apk;
pub mod bundletool;
pub mod command;
pub mod error;
pub mod utils;

pub use apk::{ExportedApk, Exporter, universal_apk_base_name};
pub use bundletool::{BuildApks, DEFAULT_RELEASES_URL, KeystoreConfig, Tool, ToolLocator};
pub use command::CommandInvocation;
pub use error::{CommandFailure, Error, Result};
