//! Output variable publishing through envman.

use crate::exporter::{CommandInvocation, Result};
use std::path::Path;

/// Output variable holding the exported APK path.
pub const APKS_PATH_KEY: &str = "APKS_PATH";

/// Builds `envman add --key <key>` with `value` delivered on stdin.
pub fn export_command(envman: &str, key: &str, value: &Path) -> CommandInvocation {
    CommandInvocation::new(envman)
        .args(["add", "--key", key])
        .stdin(value.as_os_str().as_encoded_bytes().to_vec())
}

/// Publishes `key=value` into the CI environment.
pub async fn export_environment_with_envman(envman: &str, key: &str, value: &Path) -> Result<()> {
    export_command(envman, key, value).run().await?;
    Ok(())
}
