//! Output naming for exported APKs.

use std::path::Path;

/// Suffix appended to the AAB stem.
const UNIVERSAL_SUFFIX: &str = "-universal.apk";

/// Stem used when the AAB file name leaves nothing once its extension is gone.
const FALLBACK_STEM: &str = "app";

/// Base name of the universal APK produced from `aab_path`.
///
/// Takes the file name, drops its last extension, and appends `-universal.apk`:
/// - `app/build/app-release.aab` -> `app-release-universal.apk`
/// - `bundle` -> `bundle-universal.apk`
/// - `my.app.aab` -> `my.app-universal.apk`
/// - `ci/.aab` -> `app-universal.apk`
///
/// A leading dot starts the extension too, so a bare `.aab` has an empty stem.
pub fn universal_apk_base_name(aab_path: &Path) -> String {
    let stem = aab_path
        .file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            match name.rfind('.') {
                Some(dot) => name[..dot].to_string(),
                None => name.into_owned(),
            }
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());

    format!("{}{}", stem, UNIVERSAL_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_aab_extension_and_directories() {
        let name = universal_apk_base_name(Path::new("foo/bar.aab"));
        assert_eq!(name, "bar-universal.apk");
        assert!(!name.contains(".aab"));
    }

    #[test]
    fn is_deterministic() {
        let path = Path::new("app/build/outputs/bundle/release/app-release.aab");
        assert_eq!(universal_apk_base_name(path), universal_apk_base_name(path));
    }

    #[test]
    fn missing_extension_is_a_no_op() {
        assert_eq!(universal_apk_base_name(Path::new("bundle")), "bundle-universal.apk");
    }

    #[test]
    fn only_last_extension_is_removed() {
        assert_eq!(
            universal_apk_base_name(Path::new("/ci/my.app.aab")),
            "my.app-universal.apk"
        );
    }

    #[test]
    fn falls_back_without_file_name() {
        assert_eq!(universal_apk_base_name(Path::new("/")), "app-universal.apk");
    }

    #[test]
    fn dotfile_aab_uses_fallback_stem() {
        let name = universal_apk_base_name(Path::new("ci/.aab"));
        assert_eq!(name, "app-universal.apk");
        assert!(!name.starts_with('.'));
    }
}
