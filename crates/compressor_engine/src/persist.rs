use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use compressor_logging::compressor_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::sanitize_download_name;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("download directory missing or not writable: {0}")]
    DownloadDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the download directory exists; create if missing.
pub fn ensure_download_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::DownloadDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::DownloadDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::DownloadDir(e.to_string()))?;
    }
    // Writability check; the temp file is removed on drop.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::DownloadDir(e.to_string()))?;
    Ok(())
}

/// Delivers compressed payloads into the download directory.
///
/// Each payload goes to a temporary file first and is renamed into place, so
/// a reader never observes a half-written download and a failed write leaves
/// nothing behind.
#[derive(Debug, Clone)]
pub struct DownloadWriter {
    dir: PathBuf,
}

impl DownloadWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_download_dir(&self.dir)?;

        let target = self.dir.join(sanitize_download_name(filename));
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // persist() renames over an existing target in one step.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        compressor_info!("saved download {:?} ({} bytes)", target, bytes.len());
        Ok(target)
    }
}
