//! Runtime capability probes.

/// Reports whether voice input can be offered in this runtime.
///
/// Only display code branches on this; no engine operation depends on it.
pub trait SpeechCapability: Send + Sync {
    fn is_voice_input_available(&self) -> bool;
}

/// Fixed answer, for tests and hosts that already know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSpeechCapability(pub bool);

impl SpeechCapability for StaticSpeechCapability {
    fn is_voice_input_available(&self) -> bool {
        self.0
    }
}
