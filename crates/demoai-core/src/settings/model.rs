//! Settings tree schema.
//!
//! Three fixed categories, each a struct of typed fields. Defaults match what
//! a new account sees on the settings screen.

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::RangeInclusive;
use strum_macros::{Display, EnumIter, EnumString};

/// Allowed voice sensitivity, step 1.
pub const SENSITIVITY_RANGE: RangeInclusive<u8> = 1..=10;
/// Allowed speech speed multiplier.
pub const SPEED_RANGE: RangeInclusive<f64> = 0.5..=2.0;
/// Slider granularity for speech speed.
pub const SPEED_STEP: f64 = 0.1;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    #[strum(serialize = "en-US")]
    EnglishUs,
    #[serde(rename = "en-GB")]
    #[strum(serialize = "en-GB")]
    EnglishUk,
    #[serde(rename = "es-ES")]
    #[strum(serialize = "es-ES")]
    Spanish,
    #[serde(rename = "fr-FR")]
    #[strum(serialize = "fr-FR")]
    French,
    #[serde(rename = "de-DE")]
    #[strum(serialize = "de-DE")]
    German,
    #[serde(rename = "zh-CN")]
    #[strum(serialize = "zh-CN")]
    ChineseSimplified,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceType {
    #[default]
    Female,
    Male,
    Neutral,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceSettings {
    pub enabled: bool,
    pub language: Language,
    pub voice_type: VoiceType,
    #[serde(deserialize_with = "deserialize_sensitivity")]
    pub sensitivity: u8,
    pub speed: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            language: Language::default(),
            voice_type: VoiceType::default(),
            sensitivity: 7,
            speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationSettings {
    /// Endpoint notified when a demo completes. Empty when unset.
    pub webhook: String,
    pub slack: bool,
    pub zapier: bool,
    pub analytics: bool,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            webhook: String::new(),
            slack: false,
            zapier: false,
            analytics: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceSettings {
    pub theme: Theme,
    pub notifications: bool,
    pub auto_save: bool,
    pub email_updates: bool,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            notifications: true,
            auto_save: true,
            email_updates: false,
        }
    }
}

/// The full settings configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsTree {
    pub voice: VoiceSettings,
    pub integrations: IntegrationSettings,
    pub preferences: PreferenceSettings,
}

impl SettingsTree {
    /// Brings numeric fields back into range, e.g. after loading a hand-edited file.
    pub fn normalized(mut self) -> Self {
        self.voice.sensitivity = clamp_sensitivity(self.voice.sensitivity as f64);
        self.voice.speed = if self.voice.speed.is_finite() {
            snap_speed(self.voice.speed)
        } else {
            VoiceSettings::default().speed
        };
        self
    }
}

/// Accepts any TOML number for `sensitivity` and clamps it, so one bad
/// field in a hand-edited file does not discard the whole tree.
fn deserialize_sensitivity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Integer(i64),
        Float(f64),
    }

    let sensitivity = match RawNumber::deserialize(deserializer)? {
        RawNumber::Integer(raw) => clamp_sensitivity(raw as f64),
        RawNumber::Float(raw) if raw.is_finite() => clamp_sensitivity(raw),
        RawNumber::Float(_) => VoiceSettings::default().sensitivity,
    };
    Ok(sensitivity)
}

/// Rounds to the nearest whole step and clamps into [`SENSITIVITY_RANGE`].
pub(crate) fn clamp_sensitivity(raw: f64) -> u8 {
    raw.round()
        .clamp(*SENSITIVITY_RANGE.start() as f64, *SENSITIVITY_RANGE.end() as f64) as u8
}

/// Clamps into [`SPEED_RANGE`] and snaps to [`SPEED_STEP`].
pub(crate) fn snap_speed(raw: f64) -> f64 {
    let clamped = raw.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
    let steps_per_unit = (1.0 / SPEED_STEP).round();
    (clamped * steps_per_unit).round() / steps_per_unit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tree = SettingsTree::default();
        assert!(tree.voice.enabled);
        assert_eq!(tree.voice.language, Language::EnglishUs);
        assert_eq!(tree.voice.voice_type, VoiceType::Female);
        assert_eq!(tree.voice.sensitivity, 7);
        assert_eq!(tree.voice.speed, 1.0);
        assert!(tree.integrations.webhook.is_empty());
        assert!(tree.integrations.analytics);
        assert_eq!(tree.preferences.theme, Theme::Light);
        assert!(!tree.preferences.email_updates);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(Language::ChineseSimplified.to_string(), "zh-CN");
        assert_eq!("de-DE".parse::<Language>().unwrap(), Language::German);
        assert_eq!("neutral".parse::<VoiceType>().unwrap(), VoiceType::Neutral);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let tree: SettingsTree = toml::from_str(
            r#"
            [voice]
            voiceType = "male"
            speed = 1.5

            [preferences]
            theme = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(tree.voice.voice_type, VoiceType::Male);
        assert_eq!(tree.voice.speed, 1.5);
        assert_eq!(tree.voice.sensitivity, 7);
        assert_eq!(tree.preferences.theme, Theme::Dark);
        assert!(tree.preferences.auto_save);
        assert_eq!(tree.integrations, IntegrationSettings::default());
    }

    #[test]
    fn test_sensitivity_outside_u8_is_clamped_while_loading() {
        let load = |raw: &str| -> SettingsTree {
            toml::from_str(&format!("[voice]\nsensitivity = {raw}\n")).unwrap()
        };

        assert_eq!(load("300").voice.sensitivity, 10);
        assert_eq!(load("-1").voice.sensitivity, 1);
        assert_eq!(load("7.5").voice.sensitivity, 8);
        assert_eq!(load("nan").voice.sensitivity, 7);
        assert_eq!(load("4").voice.sensitivity, 4);
    }

    #[test]
    fn test_non_numeric_sensitivity_is_still_an_error() {
        let result = toml::from_str::<SettingsTree>("[voice]\nsensitivity = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_normalized_clamps_out_of_range_fields() {
        let mut tree = SettingsTree::default();
        tree.voice.sensitivity = 0;
        tree.voice.speed = 3.7;

        let tree = tree.normalized();

        assert_eq!(tree.voice.sensitivity, 1);
        assert_eq!(tree.voice.speed, 2.0);
    }

    #[test]
    fn test_snap_speed() {
        assert!((snap_speed(1.23) - 1.2).abs() < 1e-9);
        assert!((snap_speed(0.1) - 0.5).abs() < 1e-9);
        assert_eq!(clamp_sensitivity(15.0), 10);
        assert_eq!(clamp_sensitivity(-3.0), 1);
        assert_eq!(clamp_sensitivity(6.6), 7);
    }
}
