//! Settings persistence trait.

use async_trait::async_trait;

use super::model::SettingsTree;
use crate::error::Result;

/// Repository trait for saving and restoring the settings tree.
///
/// The store itself never touches storage; hosts call `save` when the user
/// asks for it.
#[async_trait]
pub trait SettingsPersistence: Send + Sync {
    /// Loads the last saved tree. Returns `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<SettingsTree>>;

    /// Saves the full tree, replacing any previous one.
    async fn save(&self, tree: &SettingsTree) -> Result<()>;
}
