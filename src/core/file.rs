//! Shared file
//!
//! The one file being served, inspected once at startup.

use crate::util::format::{display_name, format_bytes};
use crate::util::hash::{checksum_line, sha256_reader};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while inspecting or opening the shared file
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("can't read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// File metadata captured at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub hash: String,
}

impl SharedFile {
    /// Stat and hash a file. Blocks for as long as hashing takes.
    pub fn inspect(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let path = path.into();

        let metadata = std::fs::metadata(&path).map_err(|e| FileError::from_io(&path, e))?;
        if !metadata.is_file() {
            return Err(FileError::NotAFile(path));
        }

        let file = File::open(&path).map_err(|e| FileError::from_io(&path, e))?;
        let hash = sha256_reader(file).map_err(|e| FileError::from_io(&path, e))?;

        tracing::debug!("Hashed {:?}: {} bytes, sha256 {}", path, metadata.len(), hash);

        Ok(Self {
            name: display_name(&path),
            size: metadata.len(),
            hash,
            path,
        })
    }

    /// Size with binary prefixes
    pub fn human_size(&self) -> String {
        format_bytes(self.size)
    }

    /// `sha256sum -c` compatible line
    pub fn checksum_line(&self) -> String {
        checksum_line(&self.hash, &self.name)
    }

    /// `Content-Disposition` value that makes browsers save under `name`
    pub fn content_disposition(&self) -> String {
        let fallback: String = self
            .name
            .chars()
            .map(|c| match c {
                '"' | '\\' => '_',
                c if c.is_ascii() && !c.is_ascii_control() => c,
                _ => '_',
            })
            .collect();

        if self.name.is_ascii() && !self.name.contains(['"', '\\']) {
            return format!("attachment; filename=\"{}\"", fallback);
        }

        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(&self.name)
        )
    }
}
