//! Export APK from AAB - CI step producing a universal APK with bundletool.
//!
//! Exits 0 once the APK path has been published as `APKS_PATH`, 1 on any error.

use export_apk_from_aab::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
