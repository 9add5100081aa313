//! Demo session domain model.
//!
//! A `DemoSession` is one recorded product demo. Its fields are read-only from
//! outside the crate; every mutation goes through `SessionLifecycle`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque unique identifier of a demo session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns true if the textual form of this id starts with `prefix`.
    ///
    /// Lets a host accept the first few characters of an id as shorthand.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.0.to_string().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle status of a demo session.
///
/// `Active` is the only non-terminal status; a session is `Active` exactly
/// while it is recording.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    /// Recording in progress.
    Active,
    /// Stopped normally.
    Completed,
    /// Ended by a failure.
    Failed,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Whether a session's transcript can be viewed yet.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    /// Still recording; transcription has not finished.
    Processing,
    Available,
    /// The recording failed, so there is nothing to transcribe.
    Unavailable,
}

/// A recorded product-demo session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoSession {
    pub(crate) id: SessionId,
    pub(crate) title: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) duration_seconds: u64,
    pub(crate) status: SessionStatus,
    pub(crate) is_recording: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) failure_reason: Option<String>,
}

impl DemoSession {
    /// Creates a freshly started, recording session.
    pub(crate) fn started(title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            title,
            created_at,
            duration_seconds: 0,
            status: SessionStatus::Active,
            is_recording: true,
            failure_reason: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Final duration in seconds. Zero while the session is still recording.
    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Why the session failed, if it did and a reason was given.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Derived from the status: completed sessions have a transcript.
    pub fn transcript_status(&self) -> TranscriptStatus {
        match self.status {
            SessionStatus::Active => TranscriptStatus::Processing,
            SessionStatus::Completed => TranscriptStatus::Available,
            SessionStatus::Failed => TranscriptStatus::Unavailable,
        }
    }

    /// Duration formatted as `m:ss`, the way the dashboard lists it.
    pub fn duration_label(&self) -> String {
        format_duration(self.duration_seconds)
    }
}

/// Formats whole seconds as `m:ss`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
