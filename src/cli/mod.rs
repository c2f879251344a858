//! Command line entry point of the step.
//!
//! Reads the step inputs, runs the export pipeline, and publishes the
//! resulting path as `APKS_PATH`.

mod args;
mod envman;

pub use args::{Args, DEFAULT_BUNDLETOOL_VERSION, DEFAULT_ENVMAN, StepConfig};
pub use envman::{APKS_PATH_KEY, export_command, export_environment_with_envman};

use crate::error::{CliError, Result, StepError};
use crate::exporter::{Exporter, ToolLocator};

/// Main CLI entry point
///
/// Returns the process exit code on success. Help and version requests
/// print and exit directly.
pub async fn run() -> Result<i32> {
    let args = match Args::parse_args() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            return Err(CliError::InvalidArguments {
                reason: e.to_string(),
            }
            .into());
        }
    };

    let config = args.into_config().await?;
    log::info!("{}", config);

    export(&config).await?;
    Ok(0)
}

/// Runs the pipeline for a validated configuration.
pub async fn export(config: &StepConfig) -> Result<()> {
    let locator =
        ToolLocator::new(&config.bundletool_url, &config.java).map_err(StepError::ToolInit)?;
    let tool = locator
        .resolve(&config.bundletool_version)
        .await
        .map_err(StepError::ToolInit)?;

    let exporter = Exporter::new(tool);
    let apk = exporter
        .export_universal_apk(&config.aab_path, config.keystore.as_ref())
        .await
        .map_err(StepError::Export)?;

    export_environment_with_envman(&config.envman, APKS_PATH_KEY, apk.path())
        .await
        .map_err(|source| StepError::Publish {
            key: APKS_PATH_KEY.to_string(),
            source,
        })?;

    // Only a published APK outlives its work directory.
    let apk_path = apk.persist();
    log::info!("Success apk exported to: {}", apk_path.display());
    Ok(())
}
