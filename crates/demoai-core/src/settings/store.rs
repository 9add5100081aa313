use super::key::{IntegrationKey, PreferenceKey, SettingKey, VoiceKey};
use super::model::{SPEED_RANGE, SENSITIVITY_RANGE, SettingsTree, clamp_sensitivity, snap_speed};
use super::value::SettingValue;
use crate::error::SettingsError;
use std::str::FromStr;

/// In-memory settings tree with per-field updates.
///
/// Each `set` touches exactly one field. Numeric fields are clamped into
/// their declared range instead of being rejected, matching slider controls
/// that can overshoot.
///
/// Persistence is not handled here; see `SettingsPersistence`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsStore {
    tree: SettingsTree,
}

impl SettingsStore {
    pub fn new(tree: SettingsTree) -> Self {
        Self {
            tree: tree.normalized(),
        }
    }

    /// Reads one field.
    pub fn get(&self, key: SettingKey) -> SettingValue {
        let voice = &self.tree.voice;
        let integrations = &self.tree.integrations;
        let preferences = &self.tree.preferences;

        match key {
            SettingKey::Voice(k) => match k {
                VoiceKey::Enabled => voice.enabled.into(),
                VoiceKey::Language => voice.language.to_string().into(),
                VoiceKey::VoiceType => voice.voice_type.to_string().into(),
                VoiceKey::Sensitivity => SettingValue::Integer(voice.sensitivity.into()),
                VoiceKey::Speed => voice.speed.into(),
            },
            SettingKey::Integrations(k) => match k {
                IntegrationKey::Webhook => integrations.webhook.clone().into(),
                IntegrationKey::Slack => integrations.slack.into(),
                IntegrationKey::Zapier => integrations.zapier.into(),
                IntegrationKey::Analytics => integrations.analytics.into(),
            },
            SettingKey::Preferences(k) => match k {
                PreferenceKey::Theme => preferences.theme.to_string().into(),
                PreferenceKey::Notifications => preferences.notifications.into(),
                PreferenceKey::AutoSave => preferences.auto_save.into(),
                PreferenceKey::EmailUpdates => preferences.email_updates.into(),
            },
        }
    }

    /// Writes one field and returns the value actually stored.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if the value has the wrong kind for the field
    /// - `InvalidValue` if an enumerated field gets an unknown option
    /// - `OutOfRange` if a numeric field gets NaN or an infinity
    ///
    /// On error the tree is unchanged.
    pub fn set(
        &mut self,
        key: SettingKey,
        value: impl Into<SettingValue>,
    ) -> Result<SettingValue, SettingsError> {
        let value = value.into();
        let voice = &mut self.tree.voice;
        let integrations = &mut self.tree.integrations;
        let preferences = &mut self.tree.preferences;

        match key {
            SettingKey::Voice(k) => match k {
                VoiceKey::Enabled => voice.enabled = expect_bool(key, &value)?,
                VoiceKey::Language => voice.language = expect_option(key, &value)?,
                VoiceKey::VoiceType => voice.voice_type = expect_option(key, &value)?,
                VoiceKey::Sensitivity => {
                    let raw = expect_finite(key, &value, SENSITIVITY_RANGE_F64)?;
                    voice.sensitivity = clamp_sensitivity(raw);
                }
                VoiceKey::Speed => {
                    let raw = expect_finite(key, &value, (*SPEED_RANGE.start(), *SPEED_RANGE.end()))?;
                    voice.speed = snap_speed(raw);
                }
            },
            SettingKey::Integrations(k) => match k {
                IntegrationKey::Webhook => integrations.webhook = expect_text(key, &value)?,
                IntegrationKey::Slack => integrations.slack = expect_bool(key, &value)?,
                IntegrationKey::Zapier => integrations.zapier = expect_bool(key, &value)?,
                IntegrationKey::Analytics => integrations.analytics = expect_bool(key, &value)?,
            },
            SettingKey::Preferences(k) => match k {
                PreferenceKey::Theme => preferences.theme = expect_option(key, &value)?,
                PreferenceKey::Notifications => {
                    preferences.notifications = expect_bool(key, &value)?
                }
                PreferenceKey::AutoSave => preferences.auto_save = expect_bool(key, &value)?,
                PreferenceKey::EmailUpdates => {
                    preferences.email_updates = expect_bool(key, &value)?
                }
            },
        }

        let stored = self.get(key);
        if stored != value {
            tracing::debug!("[SettingsStore] {} adjusted from {} to {}", key, value, stored);
        }
        Ok(stored)
    }

    /// Reads a field addressed by text names.
    ///
    /// # Errors
    ///
    /// `UnknownCategory` or `UnknownKey` for names outside the schema.
    pub fn get_by_name(&self, category: &str, key: &str) -> Result<SettingValue, SettingsError> {
        Ok(self.get(SettingKey::parse(category, key)?))
    }

    /// Writes a field addressed by text names.
    ///
    /// # Errors
    ///
    /// `UnknownCategory` or `UnknownKey` for names outside the schema, then
    /// anything [`set`](Self::set) reports.
    pub fn set_by_name(
        &mut self,
        category: &str,
        key: &str,
        value: impl Into<SettingValue>,
    ) -> Result<SettingValue, SettingsError> {
        self.set(SettingKey::parse(category, key)?, value)
    }

    pub fn tree(&self) -> &SettingsTree {
        &self.tree
    }

    /// Swaps in a whole tree (e.g. one loaded from storage), normalising it.
    pub fn replace(&mut self, tree: SettingsTree) {
        self.tree = tree.normalized();
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        self.tree = SettingsTree::default();
    }
}

const SENSITIVITY_RANGE_F64: (f64, f64) = (
    *SENSITIVITY_RANGE.start() as f64,
    *SENSITIVITY_RANGE.end() as f64,
);

fn expect_bool(key: SettingKey, value: &SettingValue) -> Result<bool, SettingsError> {
    value.as_bool().ok_or_else(|| SettingsError::TypeMismatch {
        key: key.to_string(),
        expected: "a boolean".to_string(),
    })
}

fn expect_text(key: SettingKey, value: &SettingValue) -> Result<String, SettingsError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SettingsError::TypeMismatch {
            key: key.to_string(),
            expected: "text".to_string(),
        })
}

fn expect_option<T: FromStr>(key: SettingKey, value: &SettingValue) -> Result<T, SettingsError> {
    let text = value.as_str().ok_or_else(|| SettingsError::TypeMismatch {
        key: key.to_string(),
        expected: "one of the listed options".to_string(),
    })?;
    text.trim().parse().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        value: text.to_string(),
    })
}

fn expect_finite(
    key: SettingKey,
    value: &SettingValue,
    (min, max): (f64, f64),
) -> Result<f64, SettingsError> {
    let raw = value.as_f64().ok_or_else(|| SettingsError::TypeMismatch {
        key: key.to_string(),
        expected: "a number".to_string(),
    })?;
    if !raw.is_finite() {
        return Err(SettingsError::OutOfRange {
            key: key.to_string(),
            min,
            max,
        });
    }
    Ok(raw)
}
