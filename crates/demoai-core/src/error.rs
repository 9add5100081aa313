//! Error types for the DemoAI engine.
//!
//! Each component reports its own typed error (`AuthError`, `SessionError`,
//! `SettingsError`). `DemoError` wraps them together with the ambient failure
//! kinds (I/O, serialization, configuration) so host code can propagate any of
//! them with `?`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by the authentication flow.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// The email does not look like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// The password is shorter than the minimum length.
    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    /// Sign-up confirmation does not match the password.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A submission is already outstanding.
    #[error("A sign-in request is already in progress")]
    AlreadyInFlight,

    /// Reserved for a real authentication backend rejecting the credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

/// Failures reported by the demo-session lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    /// Another session is still recording.
    #[error("Session '{active_id}' is already recording")]
    SessionAlreadyActive { active_id: String },

    /// No session with the given id exists in the session set.
    #[error("Session not found: '{id}'")]
    NoSuchSession { id: String },

    /// The session exists but has already finished recording.
    #[error("Session '{id}' is not recording")]
    NotRecording { id: String },
}

/// Failures reported by the settings store.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingsError {
    #[error("Unknown settings category: '{0}'")]
    UnknownCategory(String),

    #[error("Unknown setting '{key}' in category '{category}'")]
    UnknownKey { category: String, key: String },

    /// The value has the wrong kind for the field (e.g. text for a toggle).
    #[error("Setting '{key}' expects {expected}")]
    TypeMismatch { key: String, expected: String },

    /// The value is not one of the field's enumerated options.
    #[error("'{value}' is not a valid option for '{key}'")]
    InvalidValue { key: String, value: String },

    /// The numeric value cannot be clamped into range (NaN or infinite).
    #[error("Setting '{key}' must be a finite number between {min} and {max}")]
    OutOfRange { key: String, min: f64, max: f64 },
}

/// A shared error type for the entire DemoAI workspace.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DemoError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host storage error (settings persistence)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DemoError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error came from input validation rather than the host.
    ///
    /// Validation errors are shown next to the offending field; everything
    /// else goes to the notification sink.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Auth(
                AuthError::InvalidEmail
                    | AuthError::WeakPassword { .. }
                    | AuthError::PasswordMismatch
            ) | Self::Settings(_)
        )
    }

    /// Check if this is a storage or IO error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DemoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DemoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DemoError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DemoError>`.
pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_errors_convert_into_demo_error() {
        let err: DemoError = SessionError::NoSuchSession {
            id: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, DemoError::Session(_)));
        assert_eq!(err.to_string(), "Session not found: 'abc'");
    }

    #[test]
    fn test_is_validation() {
        assert!(DemoError::from(AuthError::InvalidEmail).is_validation());
        assert!(DemoError::from(SettingsError::UnknownCategory("x".into())).is_validation());
        assert!(!DemoError::from(AuthError::AlreadyInFlight).is_validation());
        assert!(!DemoError::storage("disk full").is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DemoError = io.into();
        assert!(err.is_storage());
        assert!(err.to_string().contains("NotFound"));
    }
}
