//! Step input parsing and validation.
//!
//! Inputs arrive either as flags or as the CI step's environment variables,
//! then get validated into a [`StepConfig`].

use crate::error::CliError;
use crate::exporter::{
    DEFAULT_RELEASES_URL, KeystoreConfig, bundletool::DEFAULT_RUNTIME,
    utils::fs::ensure_non_empty_file,
};
use clap::Parser;
use semver::Version;
use std::{fmt, path::PathBuf};

/// bundletool release used when none is configured.
pub const DEFAULT_BUNDLETOOL_VERSION: &str = "0.15.0";

/// Environment export tool used when none is configured.
pub const DEFAULT_ENVMAN: &str = "envman";

/// Export a universal APK from an Android App Bundle
#[derive(Parser, Debug)]
#[command(
    name = "export_apk_from_aab",
    version,
    about = "Export a universal APK from an Android App Bundle",
    long_about = "Downloads bundletool, builds a universal APK set from the given AAB,
extracts the universal APK and publishes its path as APKS_PATH through envman.

Every input can also be given through the environment variable shown in brackets.

Usage:
  export_apk_from_aab --aab-path app/build/outputs/bundle/release/app-release.aab
  aab_path=app-release.aab export_apk_from_aab --bundletool-version 1.17.2

Signing inputs are all-or-nothing: give all four or none."
)]
pub struct Args {
    /// Android App Bundle to convert
    #[arg(long, env = "aab_path", value_name = "PATH")]
    pub aab_path: Option<PathBuf>,

    /// Keystore used to sign the APK
    #[arg(long, env = "keystore_path", value_name = "PATH")]
    pub keystore_path: Option<PathBuf>,

    /// Password of the keystore
    #[arg(long, env = "keystore_password", hide_env_values = true)]
    pub keystore_password: Option<String>,

    /// Alias of the signing key
    #[arg(long, env = "keystore_alias")]
    pub keystore_alias: Option<String>,

    /// Password of the signing key
    #[arg(long, env = "private_key_password", hide_env_values = true)]
    pub private_key_password: Option<String>,

    /// bundletool release to download (MAJOR.MINOR.PATCH)
    #[arg(long, env = "bundletool_version", default_value = DEFAULT_BUNDLETOOL_VERSION)]
    pub bundletool_version: String,

    /// Base URL of the bundletool release downloads
    #[arg(long, env = "bundletool_url", default_value = DEFAULT_RELEASES_URL)]
    pub bundletool_url: String,

    /// Runtime used to launch the bundletool jar
    #[arg(long, env = "JAVA_BIN", default_value = DEFAULT_RUNTIME)]
    pub java: String,

    /// Tool used to publish output variables
    #[arg(long, env = "ENVMAN_BIN", default_value = DEFAULT_ENVMAN)]
    pub envman: String,
}

/// Validated step configuration.
#[derive(Debug, Clone)]
pub struct StepConfig {
    /// AAB to convert; exists and is not empty
    pub aab_path: PathBuf,
    /// Signing parameters, `None` for an unsigned build
    pub keystore: Option<KeystoreConfig>,
    /// bundletool release
    pub bundletool_version: Version,
    /// Release download base URL
    pub bundletool_url: String,
    /// Jar runtime
    pub java: String,
    /// Environment export tool
    pub envman: String,
}

impl fmt::Display for StepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "- aab_path: {}", self.aab_path.display())?;
        match &self.keystore {
            Some(ks) => {
                writeln!(f, "- keystore_path: {}", ks.path.display())?;
                writeln!(f, "- keystore_password: ***")?;
                writeln!(f, "- keystore_alias: {}", ks.signing_key_alias)?;
                writeln!(f, "- private_key_password: ***")?;
            }
            None => writeln!(f, "- keystore: <none, unsigned build>")?,
        }
        writeln!(f, "- bundletool_version: {}", self.bundletool_version)?;
        writeln!(f, "- bundletool_url: {}", self.bundletool_url)?;
        writeln!(f, "- java: {}", self.java)?;
        write!(f, "- envman: {}", self.envman)
    }
}

/// Treats empty values as absent.
fn non_empty<T: AsRef<std::ffi::OsStr>>(value: Option<T>) -> Option<T> {
    value.filter(|v| !v.as_ref().is_empty())
}

impl Args {
    /// Parses arguments from the process command line and environment.
    pub fn parse_args() -> std::result::Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Builds the signing config from the four all-or-nothing inputs.
    pub fn keystore(&self) -> Result<Option<KeystoreConfig>, CliError> {
        let path = non_empty(self.keystore_path.clone());
        let keystore_password = non_empty(self.keystore_password.clone());
        let alias = non_empty(self.keystore_alias.clone());
        let key_password = non_empty(self.private_key_password.clone());

        match (path, keystore_password, alias, key_password) {
            (None, None, None, None) => Ok(None),
            (Some(path), Some(keystore_password), Some(alias), Some(key_password)) => Ok(Some(
                KeystoreConfig::new(path, keystore_password, alias, key_password),
            )),
            (path, keystore_password, alias, key_password) => {
                let missing = [
                    ("keystore_path", path.is_none()),
                    ("keystore_password", keystore_password.is_none()),
                    ("keystore_alias", alias.is_none()),
                    ("private_key_password", key_password.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name.to_string())
                .collect();
                Err(CliError::IncompleteKeystore { missing })
            }
        }
    }

    /// Parses the bundletool version.
    pub fn version(&self) -> Result<Version, CliError> {
        Version::parse(self.bundletool_version.trim()).map_err(|e| CliError::InvalidArguments {
            reason: format!(
                "bundletool_version {:?} is not MAJOR.MINOR.PATCH: {}",
                self.bundletool_version, e
            ),
        })
    }

    /// Validates every input and produces the step configuration.
    pub async fn into_config(self) -> Result<StepConfig, CliError> {
        let aab_path = non_empty(self.aab_path.clone()).ok_or_else(|| CliError::MissingArgument {
            argument: "aab_path".to_string(),
        })?;

        ensure_non_empty_file(&aab_path)
            .await
            .map_err(|e| CliError::InvalidArguments {
                reason: format!("aab_path: {}", e),
            })?;

        let keystore = self.keystore()?;
        let bundletool_version = self.version()?;

        Ok(StepConfig {
            aab_path,
            keystore,
            bundletool_version,
            bundletool_url: self.bundletool_url,
            java: self.java,
            envman: self.envman,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["export_apk_from_aab"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_apply() {
        let args = parse(&["--aab-path", "app.aab"]);
        assert_eq!(args.bundletool_version, DEFAULT_BUNDLETOOL_VERSION);
        assert_eq!(args.bundletool_url, DEFAULT_RELEASES_URL);
        assert_eq!(args.java, "java");
        assert_eq!(args.envman, "envman");
        assert_eq!(args.version().unwrap(), Version::new(0, 15, 0));
    }

    #[test]
    fn no_signing_inputs_means_unsigned() {
        let args = parse(&["--aab-path", "app.aab", "--keystore-alias", ""]);
        assert!(args.keystore().unwrap().is_none());
    }

    #[test]
    fn all_signing_inputs_build_keystore() {
        let args = parse(&[
            "--keystore-path",
            "release.jks",
            "--keystore-password",
            "store",
            "--keystore-alias",
            "upload",
            "--private-key-password",
            "key",
        ]);
        let ks = args.keystore().unwrap().unwrap();
        assert_eq!(ks, KeystoreConfig::new("release.jks", "store", "upload", "key"));
    }

    #[test]
    fn partial_signing_inputs_are_rejected() {
        let args = parse(&["--keystore-path", "release.jks", "--keystore-alias", "upload"]);
        match args.keystore() {
            Err(CliError::IncompleteKeystore { missing }) => {
                assert_eq!(missing, ["keystore_password", "private_key_password"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_version_is_rejected() {
        let args = parse(&["--bundletool-version", "latest"]);
        assert!(matches!(
            args.version(),
            Err(CliError::InvalidArguments { .. })
        ));
    }

    #[tokio::test]
    async fn missing_aab_path_is_reported() {
        let args = parse(&["--aab-path", ""]);
        assert!(matches!(
            args.into_config().await,
            Err(CliError::MissingArgument { argument }) if argument == "aab_path"
        ));
    }

    #[tokio::test]
    async fn empty_aab_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let aab = dir.path().join("app-release.aab");
        std::fs::write(&aab, b"").unwrap();

        let args = parse(&["--aab-path", aab.to_str().unwrap()]);
        let err = args.into_config().await.unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[tokio::test]
    async fn valid_inputs_produce_config() {
        let dir = tempfile::tempdir().unwrap();
        let aab = dir.path().join("app-release.aab");
        std::fs::write(&aab, b"PK\x03\x04").unwrap();

        let config = parse(&["--aab-path", aab.to_str().unwrap(), "--java", "/usr/bin/java"])
            .into_config()
            .await
            .unwrap();
        assert_eq!(config.aab_path, aab);
        assert!(config.keystore.is_none());
        assert_eq!(config.java, "/usr/bin/java");

        let printed = config.to_string();
        assert!(printed.contains("unsigned build"));
        assert!(printed.contains("bundletool_version: 0.15.0"));
    }

    #[test]
    fn printed_config_hides_passwords() {
        let config = StepConfig {
            aab_path: PathBuf::from("app.aab"),
            keystore: Some(KeystoreConfig::new("r.jks", "s3cret", "upload", "k3y")),
            bundletool_version: Version::new(1, 17, 2),
            bundletool_url: DEFAULT_RELEASES_URL.to_string(),
            java: "java".to_string(),
            envman: "envman".to_string(),
        };
        let printed = config.to_string();
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("k3y"));
        assert!(printed.contains("keystore_alias: upload"));
    }
}
