//! Signing keystore parameters forwarded to `build-apks`.

use std::{fmt, path::PathBuf};

/// Keystore used to sign the generated APK set.
///
/// All four values are forwarded together; an absent config means an unsigned build.
#[derive(Clone, PartialEq, Eq)]
pub struct KeystoreConfig {
    /// Keystore file
    pub path: PathBuf,
    /// Password of the keystore itself
    pub keystore_password: String,
    /// Alias of the signing key inside the keystore
    pub signing_key_alias: String,
    /// Password of the signing key
    pub signing_key_password: String,
}

impl KeystoreConfig {
    /// Creates a keystore config.
    pub fn new(
        path: impl Into<PathBuf>,
        keystore_password: impl Into<String>,
        signing_key_alias: impl Into<String>,
        signing_key_password: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            keystore_password: keystore_password.into(),
            signing_key_alias: signing_key_alias.into(),
            signing_key_password: signing_key_password.into(),
        }
    }
}

impl fmt::Debug for KeystoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoreConfig")
            .field("path", &self.path)
            .field("keystore_password", &"***")
            .field("signing_key_alias", &self.signing_key_alias)
            .field("signing_key_password", &"***")
            .finish()
    }
}
