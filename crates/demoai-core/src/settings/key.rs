//! Closed set of settings addresses.
//!
//! Every (category, key) pair is a variant, so lookups are exhaustively
//! matched. Text names are only parsed at the boundary via [`SettingKey::parse`].

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SettingCategory {
    Voice,
    Integrations,
    Preferences,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum VoiceKey {
    Enabled,
    Language,
    VoiceType,
    Sensitivity,
    Speed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum IntegrationKey {
    Webhook,
    Slack,
    Zapier,
    Analytics,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum PreferenceKey {
    Theme,
    Notifications,
    AutoSave,
    EmailUpdates,
}

/// Address of a single setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Voice(VoiceKey),
    Integrations(IntegrationKey),
    Preferences(PreferenceKey),
}

impl SettingKey {
    /// Resolves text names such as `("voice", "sensitivity")`.
    ///
    /// Matching ignores ASCII case.
    ///
    /// # Errors
    ///
    /// - `UnknownCategory` if `category` names no category
    /// - `UnknownKey` if `key` is not part of that category's schema
    pub fn parse(category: &str, key: &str) -> Result<Self, SettingsError> {
        let parsed_category: SettingCategory = category
            .parse()
            .map_err(|_| SettingsError::UnknownCategory(category.to_string()))?;

        let unknown_key = || SettingsError::UnknownKey {
            category: parsed_category.to_string(),
            key: key.to_string(),
        };

        Ok(match parsed_category {
            SettingCategory::Voice => Self::Voice(key.parse().map_err(|_| unknown_key())?),
            SettingCategory::Integrations => {
                Self::Integrations(key.parse().map_err(|_| unknown_key())?)
            }
            SettingCategory::Preferences => {
                Self::Preferences(key.parse().map_err(|_| unknown_key())?)
            }
        })
    }

    pub fn category(&self) -> SettingCategory {
        match self {
            Self::Voice(_) => SettingCategory::Voice,
            Self::Integrations(_) => SettingCategory::Integrations,
            Self::Preferences(_) => SettingCategory::Preferences,
        }
    }

    /// Field name within the category, e.g. `"voiceType"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Voice(k) => k.into(),
            Self::Integrations(k) => k.into(),
            Self::Preferences(k) => k.into(),
        }
    }

    /// Whether the field stores text (free text or an option name).
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Voice(VoiceKey::Language | VoiceKey::VoiceType)
                | Self::Integrations(IntegrationKey::Webhook)
                | Self::Preferences(PreferenceKey::Theme)
        )
    }

    /// Every key of every category, in schema order.
    pub fn all() -> impl Iterator<Item = SettingKey> {
        VoiceKey::iter()
            .map(Self::Voice)
            .chain(IntegrationKey::iter().map(Self::Integrations))
            .chain(PreferenceKey::iter().map(Self::Preferences))
    }

    /// Keys belonging to one category.
    pub fn in_category(category: SettingCategory) -> impl Iterator<Item = SettingKey> {
        Self::all().filter(move |k| k.category() == category)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category(), self.name())
    }
}
