use crate::services::progress::ProgressReader;
use crate::utils::validation;
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Streams validated upload bodies onto the local filesystem.
///
/// Holds the canonicalized temp directory, fixed at construction. All
/// destination paths are resolved against it; nothing else about the service
/// is mutable after startup.
pub struct UploadService {
    temp_dir: PathBuf,
}

impl UploadService {
    /// Creates the service rooted at `temp_dir`, which must already exist
    pub fn new(temp_dir: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            temp_dir: temp_dir.as_ref().canonicalize()?,
        })
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Resolves the destination path for `filename`, rejecting anything that
    /// escapes the temp directory
    pub fn resolve_destination(&self, filename: &str) -> Result<PathBuf> {
        validation::resolve_destination(&self.temp_dir, filename)
    }

    /// Streams `reader` into `dest`, truncating any existing file, and
    /// returns the number of bytes written.
    ///
    /// The copy is chunked, never buffering the whole body in memory. Reader
    /// and file handle are scoped to this call and released on every exit
    /// path; a copy that fails midway may leave a partial file behind.
    pub async fn store(&self, dest: &Path, reader: impl AsyncRead + Unpin) -> io::Result<u64> {
        let mut reader = ProgressReader::new(reader);
        let mut file = File::create(dest).await?;

        let bytes = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;

        Ok(bytes)
    }
}
