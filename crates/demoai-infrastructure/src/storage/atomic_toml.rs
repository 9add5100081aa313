//! Atomic TOML file operations.
//!
//! Writes go to a temporary sibling file which is fsynced and renamed over
//! the target, under an exclusive lock file, so readers never observe a
//! half-written document.

use demoai_core::error::DemoError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during atomic TOML operations.
#[derive(Error, Debug)]
pub enum AtomicTomlError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to lock {path}: {message}")]
    Lock { path: PathBuf, message: String },
}

impl From<AtomicTomlError> for DemoError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io { .. } => DemoError::io(err.to_string()),
            AtomicTomlError::Parse { .. } | AtomicTomlError::Serialize(_) => {
                DemoError::Serialization {
                    format: "TOML".to_string(),
                    message: err.to_string(),
                }
            }
            AtomicTomlError::Lock { .. } => DemoError::storage(err.to_string()),
        }
    }
}

/// A handle to a TOML document on disk.
#[derive(Debug, Clone)]
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| AtomicTomlError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Replaces the document atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write_locked(data)
    }

    /// Loads the document, writing `default` first if there is none.
    ///
    /// The check and the write happen under the same lock, so two processes
    /// starting together agree on one initial document.
    pub fn load_or_init(&self, default: impl FnOnce() -> T) -> Result<T, AtomicTomlError> {
        let _lock = FileLock::acquire(&self.path)?;
        if let Some(existing) = self.load()? {
            return Ok(existing);
        }

        let data = default();
        self.write_locked(&data)?;
        tracing::debug!("[AtomicTomlFile] Created {}", self.path.display());
        Ok(data)
    }

    fn write_locked(&self, data: &T) -> Result<(), AtomicTomlError> {
        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        tmp_file
            .write_all(toml_string.as_bytes())
            .and_then(|_| tmp_file.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let (parent, file_name) = self
            .path
            .parent()
            .zip(self.path.file_name())
            .ok_or_else(|| {
                self.io_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no parent directory or file name",
                ))
            })?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }

    fn io_error(&self, source: std::io::Error) -> AtomicTomlError {
        AtomicTomlError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Exclusive lock on `<path>.lock`, released when the handle closes.
///
/// The lock file is never removed: unlinking it while another process waits
/// on the same inode would let a third process lock a fresh file.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");
        let io_error = |source| AtomicTomlError::Io {
            path: lock_path.clone(),
            source,
        };

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(io_error)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| AtomicTomlError::Lock {
                path: lock_path.clone(),
                message: e.to_string(),
            })?;
        }

        Ok(FileLock { _file: file })
    }
}
