//! Download utilities
//!
//! Streams a remote file to disk while hashing it.

use anyhow::{Context, Result};
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// A completed download
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: u64,
    pub sha256: String,
}

/// Fetch a URL as text
pub async fn fetch_text(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()?;
    Ok(response.text().await?)
}

/// Download a file to the specified path, hashing it on the way.
/// An existing file at `dest` is an error unless `overwrite` is set.
pub async fn download_file(url: &str, dest: &Path, overwrite: bool) -> Result<Download> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options
        .open(dest)
        .await
        .with_context(|| format!("Can't create {}", dest.display()))?;
    let mut hasher = Sha256::new();
    let mut bytes = 0u64;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Download interrupted")?;
        hasher.update(&chunk);
        file.write_all(&chunk).await?;
        bytes += chunk.len() as u64;
    }
    file.flush().await?;

    tracing::debug!("Downloaded {} bytes to {:?}", bytes, dest);

    Ok(Download {
        bytes,
        sha256: format!("{:x}", hasher.finalize()),
    })
}
