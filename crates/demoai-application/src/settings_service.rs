//! Settings use case.
//!
//! Wraps a [`SettingsStore`] with loading and saving through a
//! [`SettingsPersistence`] backend, and reports the save outcome to the
//! notification sink.

use demoai_core::clock::{Clock, SystemClock};
use demoai_core::error::{Result, SettingsError};
use demoai_core::notification::{Notification, NotificationSink};
use demoai_core::settings::{SettingKey, SettingValue, SettingsPersistence, SettingsStore, SettingsTree};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct SettingsService {
    store: Mutex<SettingsStore>,
    persistence: Arc<dyn SettingsPersistence>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl SettingsService {
    /// Creates the service with default settings, without touching storage.
    pub fn new(
        persistence: Arc<dyn SettingsPersistence>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store: Mutex::new(SettingsStore::default()),
            persistence,
            notifier,
            clock: Arc::new(SystemClock),
        }
    }

    /// Stamps save notifications from `clock` instead of the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification.at(self.clock.now()));
    }

    /// Creates the service and restores the last saved tree.
    ///
    /// Loading is best effort: if storage fails the service starts from
    /// defaults and the failure is logged.
    pub async fn load(
        persistence: Arc<dyn SettingsPersistence>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let service = Self::new(persistence, notifier);
        match service.persistence.load().await {
            Ok(Some(tree)) => {
                tracing::debug!("[SettingsService] Restored saved settings");
                service.lock().replace(tree);
            }
            Ok(None) => tracing::debug!("[SettingsService] No saved settings, using defaults"),
            Err(e) => tracing::warn!("[SettingsService] Failed to load settings, using defaults: {}", e),
        }
        service
    }

    fn lock(&self) -> MutexGuard<'_, SettingsStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: SettingKey) -> SettingValue {
        self.lock().get(key)
    }

    /// # Errors
    ///
    /// `UnknownCategory` or `UnknownKey` for names outside the schema.
    pub fn get_by_name(&self, category: &str, key: &str) -> std::result::Result<SettingValue, SettingsError> {
        self.lock().get_by_name(category, key)
    }

    /// Updates one field in memory. Call [`save`](Self::save) to persist.
    ///
    /// # Returns
    ///
    /// The value actually stored, after clamping.
    pub fn set(
        &self,
        key: SettingKey,
        value: impl Into<SettingValue>,
    ) -> std::result::Result<SettingValue, SettingsError> {
        self.lock().set(key, value)
    }

    pub fn set_by_name(
        &self,
        category: &str,
        key: &str,
        value: impl Into<SettingValue>,
    ) -> std::result::Result<SettingValue, SettingsError> {
        self.lock().set_by_name(category, key, value)
    }

    pub fn tree(&self) -> SettingsTree {
        self.lock().tree().clone()
    }

    /// Restores defaults in memory.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Persists the current tree and announces the outcome.
    ///
    /// # Errors
    ///
    /// Returns the storage error; it is also sent to the notification sink.
    pub async fn save(&self) -> Result<()> {
        let tree = self.tree();
        match self.persistence.save(&tree).await {
            Ok(()) => {
                tracing::info!("[SettingsService] Settings saved");
                self.notify(Notification::success(
                    "Settings saved",
                    "Your preferences have been updated successfully.",
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[SettingsService] Failed to save settings: {}", e);
                self.notify(Notification::error("Settings not saved", e.to_string()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use demoai_core::clock::ManualClock;
    use demoai_core::error::DemoError;
    use demoai_core::notification::NotificationLevel;
    use demoai_core::settings::Theme;

    #[derive(Default)]
    struct MemoryPersistence {
        saved: Mutex<Option<SettingsTree>>,
        fail: bool,
    }

    #[async_trait]
    impl SettingsPersistence for MemoryPersistence {
        async fn load(&self) -> Result<Option<SettingsTree>> {
            if self.fail {
                return Err(DemoError::storage("disk unavailable"));
            }
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, tree: &SettingsTree) -> Result<()> {
            if self.fail {
                return Err(DemoError::storage("disk unavailable"));
            }
            *self.saved.lock().unwrap() = Some(tree.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<Notification>>);

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    #[tokio::test]
    async fn test_save_persists_and_notifies() {
        let persistence = Arc::new(MemoryPersistence::default());
        let sink = Arc::new(RecordingSink::default());
        let service = SettingsService::load(persistence.clone(), sink.clone()).await;

        service.set_by_name("preferences", "theme", "dark").unwrap();
        service.save().await.unwrap();

        let saved = persistence.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.preferences.theme, Theme::Dark);
        let received = sink.0.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].title, "Settings saved");
        assert_eq!(
            received[0].description,
            "Your preferences have been updated successfully."
        );
    }

    #[tokio::test]
    async fn test_load_restores_saved_tree() {
        let persistence = Arc::new(MemoryPersistence::default());
        let mut tree = SettingsTree::default();
        tree.voice.sensitivity = 3;
        *persistence.saved.lock().unwrap() = Some(tree);

        let service = SettingsService::load(persistence, Arc::new(RecordingSink::default())).await;

        assert_eq!(
            service.get_by_name("voice", "sensitivity").unwrap(),
            SettingValue::Integer(3)
        );
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let persistence = Arc::new(MemoryPersistence {
            fail: true,
            ..Default::default()
        });
        let sink = Arc::new(RecordingSink::default());

        // Load failure falls back to defaults
        let service = SettingsService::load(persistence, sink.clone()).await;
        assert_eq!(service.tree(), SettingsTree::default());

        let err = service.save().await.unwrap_err();
        assert!(err.is_storage());
        let received = sink.0.lock().unwrap();
        assert_eq!(received[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_save_notification_uses_injected_clock() {
        let clock = Arc::new(ManualClock::default());
        let sink = Arc::new(RecordingSink::default());
        let service = SettingsService::new(Arc::new(MemoryPersistence::default()), sink.clone())
            .with_clock(clock.clone());

        clock.advance(chrono::Duration::minutes(5));
        service.save().await.unwrap();

        let received = sink.0.lock().unwrap();
        assert_eq!(received[0].timestamp, clock.now());
    }

    #[tokio::test]
    async fn test_set_clamps_and_does_not_persist() {
        let persistence = Arc::new(MemoryPersistence::default());
        let service = SettingsService::new(persistence.clone(), Arc::new(RecordingSink::default()));

        let stored = service.set_by_name("voice", "speed", 5.0).unwrap();

        assert_eq!(stored, SettingValue::Number(2.0));
        assert!(persistence.saved.lock().unwrap().is_none());
    }
}
