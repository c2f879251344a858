//! Universal APK export.
//!
//! The [`Exporter`] drives one export per call:
//! 1. Creates a fresh work directory
//! 2. Builds `universal.apks` into it through a [`BuildApks`] implementation
//! 3. Checks the archive holds `universal.apk`
//! 4. Unzips the archive into the same directory
//! 5. Renames the APK after the input AAB
//!
//! The work directory is removed on every failure path and when the
//! resulting [`ExportedApk`] is dropped without being persisted.

mod archive;
mod naming;

pub use archive::{APKS_ARCHIVE_NAME, UNIVERSAL_APK_NAME, unzip_command};
pub use naming::universal_apk_base_name;

use crate::exporter::{
    bundletool::{BuildApks, KeystoreConfig},
    error::{ErrorExt, Result},
    utils::{checksum::calculate_sha256, fs},
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An exported universal APK living in its work directory.
#[derive(Debug)]
pub struct ExportedApk {
    path: PathBuf,
    size: u64,
    checksum: String,
    workdir: TempDir,
}

impl ExportedApk {
    /// Path of the renamed APK.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Hex-encoded SHA-256.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Keeps the work directory on disk and returns the APK path.
    pub fn persist(self) -> PathBuf {
        let workdir = self.workdir.keep();
        log::debug!("Keeping work directory {}", workdir.display());
        self.path
    }
}

/// Exports universal APKs from AAB files.
#[derive(Debug)]
pub struct Exporter<B> {
    bundletool: B,
}

impl<B: BuildApks> Exporter<B> {
    /// Creates an exporter using `bundletool` to build APK sets.
    pub fn new(bundletool: B) -> Self {
        Self { bundletool }
    }

    /// The APK set builder in use.
    pub fn bundletool(&self) -> &B {
        &self.bundletool
    }

    /// Builds, extracts, and renames the universal APK for `aab_path`.
    ///
    /// The AAB itself is not validated here; a missing or broken bundle
    /// surfaces as a `build-apks` failure.
    pub async fn export_universal_apk(
        &self,
        aab_path: &Path,
        keystore: Option<&KeystoreConfig>,
    ) -> Result<ExportedApk> {
        let workdir = fs::create_temp_dir("universal-apk")?;
        let apks_path = workdir.path().join(APKS_ARCHIVE_NAME);

        self.bundletool
            .build_apks(aab_path, keystore, &apks_path)
            .await?;

        archive::ensure_universal_member(&apks_path).await?;
        let universal_apk =
            archive::unzip_universal_apks_archive(&apks_path, workdir.path()).await?;

        let renamed = workdir.path().join(universal_apk_base_name(aab_path));
        fs::rename(&universal_apk, &renamed).await?;
        fs::remove_file(&apks_path).await?;

        let size = tokio::fs::metadata(&renamed)
            .await
            .fs_context("reading exported APK metadata", &renamed)?
            .len();
        let checksum = calculate_sha256(&renamed).await?;

        log::info!(
            "✓ Exported universal APK: {} ({} bytes, sha256 {})",
            renamed.display(),
            size,
            checksum
        );

        Ok(ExportedApk {
            path: renamed,
            size,
            checksum,
            workdir,
        })
    }
}
