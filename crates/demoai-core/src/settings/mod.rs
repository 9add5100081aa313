//! User settings domain module.
//!
//! # Module Structure
//!
//! - `key`: Typed addresses of every setting (`SettingKey`, `SettingCategory`)
//! - `value`: Values exchanged at the store boundary (`SettingValue`)
//! - `model`: The settings tree and its per-category structs
//! - `store`: Read/update with range clamping (`SettingsStore`)
//! - `persistence`: Repository trait (`SettingsPersistence`)
//!
//! # Usage
//!
//! ```
//! use demoai_core::settings::{SettingValue, SettingsStore};
//!
//! let mut store = SettingsStore::default();
//! let stored = store.set_by_name("voice", "sensitivity", 15i64).unwrap();
//! assert_eq!(stored, SettingValue::Integer(10));
//! ```

mod key;
mod model;
mod persistence;
mod store;
mod value;

// Re-export public API
pub use key::{IntegrationKey, PreferenceKey, SettingCategory, SettingKey, VoiceKey};
pub use model::{
    IntegrationSettings, Language, PreferenceSettings, SENSITIVITY_RANGE, SPEED_RANGE, SPEED_STEP,
    SettingsTree, Theme, VoiceSettings, VoiceType,
};
pub use persistence::SettingsPersistence;
pub use store::SettingsStore;
pub use value::SettingValue;
