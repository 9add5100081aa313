//! Settings persistence backends.

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use demoai_core::error::{DemoError, Result};
use demoai_core::settings::{SettingsPersistence, SettingsTree};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Stores the settings tree as `settings.toml`.
///
/// File access runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct TomlSettingsRepository {
    file: Arc<AtomicTomlFile<SettingsTree>>,
}

impl TomlSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }
}

#[async_trait]
impl SettingsPersistence for TomlSettingsRepository {
    async fn load(&self) -> Result<Option<SettingsTree>> {
        let file = self.file.clone();
        let tree = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| DemoError::internal(format!("settings load task failed: {e}")))??;
        tracing::debug!(
            "[TomlSettingsRepository] Loaded settings from {}: found={}",
            self.file.path().display(),
            tree.is_some()
        );
        Ok(tree)
    }

    async fn save(&self, tree: &SettingsTree) -> Result<()> {
        let file = self.file.clone();
        let tree = tree.clone();
        tokio::task::spawn_blocking(move || file.save(&tree))
            .await
            .map_err(|e| DemoError::internal(format!("settings save task failed: {e}")))??;
        tracing::debug!(
            "[TomlSettingsRepository] Saved settings to {}",
            self.file.path().display()
        );
        Ok(())
    }
}

/// Keeps the saved tree in memory, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    saved: RwLock<Option<SettingsTree>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `tree` already saved.
    pub fn with_tree(tree: SettingsTree) -> Self {
        Self {
            saved: RwLock::new(Some(tree)),
        }
    }
}

#[async_trait]
impl SettingsPersistence for InMemorySettingsRepository {
    async fn load(&self) -> Result<Option<SettingsTree>> {
        Ok(self.saved.read().await.clone())
    }

    async fn save(&self, tree: &SettingsTree) -> Result<()> {
        *self.saved.write().await = Some(tree.clone());
        Ok(())
    }
}
