//! HTTP utilities for downloading tools.
//!
//! Tries download candidates in order and streams the first 200 OK body to disk.

use crate::exporter::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Returns the response of the first source answering 200 OK.
///
/// Non-200 statuses move on to the next source. A transport error stops the
/// search immediately and is returned as is.
pub async fn get_from_multiple_sources(sources: &[String]) -> Result<reqwest::Response> {
    for source in sources {
        log::debug!("Trying {}", source);
        let response = reqwest::get(source).await?;

        if response.status() == reqwest::StatusCode::OK {
            log::info!("URL used to download bundletool: {}", source);
            return Ok(response);
        }

        log::debug!("{} answered {}", source, response.status());
    }

    Err(Error::NoSourceAvailable {
        sources: sources.to_vec(),
    })
}

/// Downloads the first available source into `destination`.
///
/// The file is only created once a source has been chosen.
pub async fn download_first_available(sources: &[String], destination: &Path) -> Result<u64> {
    let mut response = get_from_multiple_sources(sources).await?;

    let file = tokio::fs::File::create(destination)
        .await
        .fs_context("creating download file", destination)?;
    let mut writer = BufWriter::new(file);
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        writer
            .write_all(&chunk)
            .await
            .fs_context("writing download", destination)?;
        written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .fs_context("flushing download", destination)?;

    Ok(written)
}
