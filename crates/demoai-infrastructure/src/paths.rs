//! Path management for DemoAI files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/demoai/            # Base directory (or $DEMOAI_HOME)
//! ├── config.toml              # Application configuration
//! ├── settings.toml            # Saved user settings
//! └── logs/                    # Application logs
//!     └── demoai.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the base directory.
pub const HOME_ENV: &str = "DEMOAI_HOME";

const APP_DIR: &str = "demoai";

/// Errors that can occur during path resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Cannot find the user configuration directory")]
    ConfigDirNotFound,
}

/// Resolved locations of every file DemoAI reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPaths {
    base: PathBuf,
}

impl DemoPaths {
    /// Uses `$DEMOAI_HOME` if set and non-empty, else `<config_dir>/demoai`.
    pub fn resolve() -> Result<Self, PathError> {
        Self::resolve_with(std::env::var_os(HOME_ENV).map(PathBuf::from))
    }

    fn resolve_with(home_override: Option<PathBuf>) -> Result<Self, PathError> {
        if let Some(base) = home_override.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self::at(base));
        }
        dirs::config_dir()
            .map(|dir| Self::at(dir.join(APP_DIR)))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Roots every path at `base`.
    pub fn at(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base.join("settings.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }
}
