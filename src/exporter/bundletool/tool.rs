//! Handle to a local bundletool jar.

use super::{BuildApks, KeystoreConfig};
use crate::exporter::{command::CommandInvocation, error::Result};
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// A resolved bundletool jar plus the runtime that launches it.
///
/// When created by [`super::ToolLocator`], the handle owns the download
/// directory and removes it on drop.
#[derive(Debug)]
pub struct Tool {
    path: PathBuf,
    runtime: OsString,
    _download_dir: Option<TempDir>,
}

impl Tool {
    /// Wraps an existing jar. The file is left in place on drop.
    pub fn new(path: impl Into<PathBuf>, runtime: impl AsRef<OsStr>) -> Self {
        Self {
            path: path.into(),
            runtime: runtime.as_ref().to_os_string(),
            _download_dir: None,
        }
    }

    pub(super) fn downloaded(path: PathBuf, runtime: &OsStr, download_dir: TempDir) -> Self {
        Self {
            path,
            runtime: runtime.to_os_string(),
            _download_dir: Some(download_dir),
        }
    }

    /// Path of the jar.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds `<runtime> -jar <jar> <subcommand> <args...>`.
    pub fn build_command<I, S>(&self, subcommand: &str, args: I) -> CommandInvocation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        CommandInvocation::new(&self.runtime)
            .arg("-jar")
            .arg(&self.path)
            .arg(subcommand)
            .args(args)
    }

    /// Builds the `build-apks --mode=universal` invocation.
    ///
    /// Signing flags follow in the order `--ks`, `--ks-pass`, `--ks-key-alias`,
    /// `--key-pass` when a keystore is given. Passwords are marked secret.
    pub fn build_apks_command(
        &self,
        aab_path: &Path,
        keystore: Option<&KeystoreConfig>,
        output: &Path,
    ) -> CommandInvocation {
        let mut args: Vec<&OsStr> = vec![OsStr::new("--mode=universal")];
        args.extend([OsStr::new("--bundle"), aab_path.as_os_str()]);
        args.extend([OsStr::new("--output"), output.as_os_str()]);

        let cmd = self.build_command("build-apks", args);
        match keystore {
            Some(ks) => cmd
                .arg("--ks")
                .arg(&ks.path)
                .arg("--ks-pass")
                .secret_arg(&ks.keystore_password)
                .arg("--ks-key-alias")
                .arg(&ks.signing_key_alias)
                .arg("--key-pass")
                .secret_arg(&ks.signing_key_password),
            None => cmd,
        }
    }
}

impl BuildApks for Tool {
    async fn build_apks(
        &self,
        aab_path: &Path,
        keystore: Option<&KeystoreConfig>,
        output: &Path,
    ) -> Result<()> {
        log::info!("Building universal APK set from {}", aab_path.display());
        self.build_apks_command(aab_path, keystore, output)
            .run()
            .await?;
        Ok(())
    }
}
