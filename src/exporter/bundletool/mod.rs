//! bundletool integration.
//!
//! - `keystore` - Signing parameters for `build-apks`
//! - `locator` - Release download into a scoped temporary directory
//! - `tool` - Local jar handle and command construction

mod keystore;
mod locator;
mod tool;

pub use keystore::KeystoreConfig;
pub use locator::{DEFAULT_RELEASES_URL, DEFAULT_RUNTIME, TOOL_FILE_NAME, ToolLocator};
pub use tool::Tool;

use crate::exporter::error::Result;
use std::{future::Future, path::Path};

/// Anything that can turn an AAB into a universal `.apks` archive.
pub trait BuildApks {
    /// Writes the universal APK set for `aab_path` to `output`.
    fn build_apks(
        &self,
        aab_path: &Path,
        keystore: Option<&KeystoreConfig>,
        output: &Path,
    ) -> impl Future<Output = Result<()>> + Send;
}
