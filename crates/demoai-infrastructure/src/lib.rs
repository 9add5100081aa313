//! Infrastructure for DemoAI: file locations, configuration loading,
//! settings storage and host-facing collaborators.

pub mod config_service;
pub mod notification;
pub mod paths;
pub mod settings_repository;
pub mod speech;
pub mod storage;

pub use config_service::ConfigService;
pub use notification::{ChannelNotificationSink, TracingNotificationSink};
pub use paths::{DemoPaths, PathError};
pub use settings_repository::{InMemorySettingsRepository, TomlSettingsRepository};
pub use speech::EnvSpeechCapability;
