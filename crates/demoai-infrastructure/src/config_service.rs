//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`, creating the file with
//! defaults on first run.

use crate::paths::DemoPaths;
use crate::storage::AtomicTomlFile;
use demoai_core::config::RootConfig;
use demoai_core::error::Result;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<RootConfig>,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &DemoPaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.config_file()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A file that cannot be read or parsed yields defaults (logged). The
    /// defaults are cached too, so the warning appears once.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!("[ConfigService] Using default configuration: {}", e);
            RootConfig::default()
        });

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Reads `config.toml`, writing a default one if it is missing.
    ///
    /// # Errors
    ///
    /// I/O or parse failures of the config file.
    pub fn load_config(&self) -> Result<RootConfig> {
        let config = self.file.load_or_init(RootConfig::default)?;
        tracing::debug!(
            "[ConfigService] Loaded configuration from {}",
            self.file.path().display()
        );
        Ok(config)
    }
}
