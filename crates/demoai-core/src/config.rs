//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section and
//! field has a default, so a partial (or empty) file is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub auth: AuthConfig,
    pub dashboard: DashboardConfig,
    pub speech: SpeechConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Simulated round-trip time of a sign-in or sign-up request.
    pub latency_ms: u64,
}

impl AuthConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { latency_ms: 1500 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Whether demo mode starts with the canned sessions.
    pub seed_demo_fixtures: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed_demo_fixtures: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub voice_input: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self { voice_input: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
