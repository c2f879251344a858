//! APK set archive inspection and extraction.

use crate::{
    bail,
    exporter::{
        command::CommandInvocation,
        error::{Context, ErrorExt, Result},
    },
};
use std::path::{Path, PathBuf};

/// Archive written by `build-apks --mode=universal`.
pub const APKS_ARCHIVE_NAME: &str = "universal.apks";

/// Member holding the universal APK inside the archive.
pub const UNIVERSAL_APK_NAME: &str = "universal.apk";

/// Checks that `archive` is a readable zip with a `universal.apk` member.
pub async fn ensure_universal_member(archive: &Path) -> Result<()> {
    let path = archive.to_path_buf();

    let names = tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
        let file = std::fs::File::open(&path).fs_context("opening APK set", &path)?;
        let archive = zip::ZipArchive::new(file)?;
        Ok(archive.file_names().map(str::to_string).collect())
    })
    .await
    .context("Archive inspection task panicked")??;

    if !names.iter().any(|n| n == UNIVERSAL_APK_NAME) {
        bail!(
            "{} does not contain {} (entries: {})",
            archive.display(),
            UNIVERSAL_APK_NAME,
            names.join(", ")
        );
    }

    Ok(())
}

/// Command extracting `archive` into `dest_dir`.
pub fn unzip_command(archive: &Path, dest_dir: &Path) -> CommandInvocation {
    CommandInvocation::new("unzip")
        .arg(archive)
        .arg("-d")
        .arg(dest_dir)
}

/// Unzips a universal APK set and returns the extracted `universal.apk` path.
pub async fn unzip_universal_apks_archive(archive: &Path, dest_dir: &Path) -> Result<PathBuf> {
    unzip_command(archive, dest_dir).run().await?;

    let universal_apk = dest_dir.join(UNIVERSAL_APK_NAME);
    if !tokio::fs::try_exists(&universal_apk)
        .await
        .fs_context("checking extracted APK", &universal_apk)?
    {
        bail!("unzip did not produce {}", universal_apk.display());
    }

    Ok(universal_apk)
}
