//! bundletool download and resolution.

use super::Tool;
use crate::exporter::{
    error::{Error, Result},
    utils::{checksum::calculate_sha256, fs::create_temp_dir, http},
};
use semver::Version;
use std::ffi::{OsStr, OsString};
use url::Url;

/// GitHub releases location of bundletool.
pub const DEFAULT_RELEASES_URL: &str = "https://github.com/google/bundletool/releases/download";

/// Runtime used to launch the jar.
pub const DEFAULT_RUNTIME: &str = "java";

/// File name of the downloaded jar.
pub const TOOL_FILE_NAME: &str = "bundletool-all.jar";

/// Resolves a bundletool release into a local [`Tool`].
#[derive(Debug, Clone)]
pub struct ToolLocator {
    base_url: Url,
    runtime: OsString,
}

impl ToolLocator {
    /// Creates a locator downloading from `base_url`, launching jars with `runtime`.
    pub fn new(base_url: &str, runtime: impl AsRef<OsStr>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::GenericError(format!(
                "download URL cannot be a base: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            runtime: runtime.as_ref().to_os_string(),
        })
    }

    /// Download candidates for `version`, in the order they are tried.
    ///
    /// The versioned file name comes first, the generic `bundletool-all.jar` second.
    pub fn candidate_urls(&self, version: &Version) -> Vec<String> {
        let version = version.to_string();
        [format!("bundletool-all-{}.jar", version), TOOL_FILE_NAME.to_string()]
            .into_iter()
            .map(|file| self.release_asset_url(&version, &file))
            .collect()
    }

    fn release_asset_url(&self, version: &str, file: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(version).push(file);
        }
        url.to_string()
    }

    /// Downloads `version` into a fresh temporary directory.
    ///
    /// The returned [`Tool`] owns that directory.
    pub async fn resolve(&self, version: &Version) -> Result<Tool> {
        match which::which(&self.runtime) {
            Ok(path) => log::debug!("Found jar runtime at: {}", path.display()),
            Err(e) => log::warn!(
                "{} not found in PATH: {}. build-apks will fail to start.",
                self.runtime.to_string_lossy(),
                e
            ),
        }

        let download_dir = create_temp_dir("bundletool")?;
        let tool_path = download_dir.path().join(TOOL_FILE_NAME);

        let size = http::download_first_available(&self.candidate_urls(version), &tool_path).await?;

        log::info!("bundletool path created at: {}", tool_path.display());
        log::debug!(
            "bundletool {} is {} bytes, sha256 {}",
            version,
            size,
            calculate_sha256(&tool_path).await?
        );

        Ok(Tool::downloaded(tool_path, &self.runtime, download_dir))
    }
}
