//! Aggregates derived from the session set.

use super::model::{DemoSession, SessionStatus};
use serde::{Deserialize, Serialize};

/// Session counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub failed: usize,
}

impl SessionStats {
    pub fn from_sessions<'a>(sessions: impl IntoIterator<Item = &'a DemoSession>) -> Self {
        sessions
            .into_iter()
            .fold(Self::default(), |mut stats, session| {
                stats.total += 1;
                match session.status() {
                    SessionStatus::Active => stats.active += 1,
                    SessionStatus::Completed => stats.completed += 1,
                    SessionStatus::Failed => stats.failed += 1,
                }
                stats
            })
    }
}

/// Figures shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub stats: SessionStats,
    /// Mean duration of completed sessions, `None` when nothing has completed.
    pub average_duration_seconds: Option<u64>,
    /// Completed sessions as a whole percentage of all sessions.
    pub completion_rate_percent: Option<u8>,
}

impl SessionSummary {
    pub fn from_sessions(sessions: &[DemoSession]) -> Self {
        let stats = SessionStats::from_sessions(sessions);

        let completed_durations: Vec<u64> = sessions
            .iter()
            .filter(|s| s.status() == SessionStatus::Completed)
            .map(DemoSession::duration_seconds)
            .collect();

        let average_duration_seconds = (!completed_durations.is_empty()).then(|| {
            let sum: u64 = completed_durations.iter().sum();
            // Round half up
            (sum + completed_durations.len() as u64 / 2) / completed_durations.len() as u64
        });

        let completion_rate_percent = (stats.total > 0)
            .then(|| ((stats.completed * 100 + stats.total / 2) / stats.total) as u8);

        Self {
            stats,
            average_duration_seconds,
            completion_rate_percent,
        }
    }
}
