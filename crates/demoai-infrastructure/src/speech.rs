//! Voice input availability probe.

use demoai_core::capability::SpeechCapability;
use demoai_core::config::SpeechConfig;

/// Environment variable that forces voice input on or off.
pub const VOICE_INPUT_ENV: &str = "DEMOAI_VOICE_INPUT";

/// Decides voice availability from config, overridable by environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSpeechCapability {
    available: bool,
}

impl EnvSpeechCapability {
    /// Reads `$DEMOAI_VOICE_INPUT` once; unrecognised values are ignored.
    pub fn from_config(config: &SpeechConfig) -> Self {
        let override_value = std::env::var(VOICE_INPUT_ENV).ok();
        Self::resolve(config, override_value.as_deref())
    }

    fn resolve(config: &SpeechConfig, override_value: Option<&str>) -> Self {
        let available = match override_value.map(parse_flag) {
            Some(Some(flag)) => flag,
            Some(None) => {
                tracing::warn!(
                    "[EnvSpeechCapability] Ignoring unrecognised {} value: {:?}",
                    VOICE_INPUT_ENV,
                    override_value
                );
                config.voice_input
            }
            None => config.voice_input,
        };
        Self { available }
    }
}

impl SpeechCapability for EnvSpeechCapability {
    fn is_voice_input_available(&self) -> bool {
        self.available
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
