use super::fixtures::SessionFixture;
use super::model::{DemoSession, SessionId, SessionStatus};
use super::stats::{SessionStats, SessionSummary};
use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Owns the session set and enforces the single-active-recording rule.
///
/// `SessionLifecycle` is responsible for:
/// - Starting sessions (at most one recording at a time)
/// - Stopping or failing the recording session and stamping its duration
/// - Searching and aggregating the set
/// - Seeding demo fixtures and resetting on logout
///
/// Sessions are kept newest first and are never removed individually.
pub struct SessionLifecycle {
    /// Session set, most recent first
    sessions: Vec<DemoSession>,
    /// Time source for timestamps and durations
    clock: Arc<dyn Clock>,
}

impl SessionLifecycle {
    /// Creates an empty lifecycle driven by the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Vec::new(),
            clock,
        }
    }

    /// Starts a session titled "Demo Session N".
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyActive` if another session is still recording.
    pub fn start_session(&mut self) -> Result<DemoSession, SessionError> {
        let title = format!("Demo Session {}", self.sessions.len() + 1);
        self.start_named_session(title)
    }

    /// Starts a session with an explicit title.
    ///
    /// The new session is `Active`, recording, has zero duration and is placed
    /// at the front of the set.
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyActive` if another session is still recording.
    pub fn start_named_session(
        &mut self,
        title: impl Into<String>,
    ) -> Result<DemoSession, SessionError> {
        if let Some(active) = self.active_session() {
            return Err(SessionError::SessionAlreadyActive {
                active_id: active.id().to_string(),
            });
        }

        let session = DemoSession::started(title.into(), self.clock.now());
        tracing::info!(
            "[SessionLifecycle] Started session: id={}, title={}",
            session.id(),
            session.title()
        );

        self.sessions.insert(0, session.clone());
        Ok(session)
    }

    /// Stops a recording session, marking it `Completed`.
    ///
    /// # Errors
    ///
    /// - `NoSuchSession` if `id` is not in the set
    /// - `NotRecording` if the session already finished
    pub fn stop_session(&mut self, id: &SessionId) -> Result<DemoSession, SessionError> {
        self.finish(id, SessionStatus::Completed, None)
    }

    /// Ends a recording session as `Failed`.
    ///
    /// # Errors
    ///
    /// Same as [`stop_session`](Self::stop_session).
    pub fn fail_session(
        &mut self,
        id: &SessionId,
        reason: impl Into<String>,
    ) -> Result<DemoSession, SessionError> {
        self.finish(id, SessionStatus::Failed, Some(reason.into()))
    }

    fn finish(
        &mut self,
        id: &SessionId,
        status: SessionStatus,
        reason: Option<String>,
    ) -> Result<DemoSession, SessionError> {
        let now = self.clock.now();
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or_else(|| SessionError::NoSuchSession { id: id.to_string() })?;

        if !session.is_recording {
            return Err(SessionError::NotRecording { id: id.to_string() });
        }

        // A clock that went backwards yields zero rather than a negative duration
        let elapsed = (now - session.created_at).num_seconds().max(0) as u64;

        session.status = status;
        session.is_recording = false;
        session.duration_seconds = elapsed;
        session.failure_reason = reason;

        tracing::info!(
            "[SessionLifecycle] Session finished: id={}, status={}, duration={}s",
            session.id,
            session.status,
            session.duration_seconds
        );

        Ok(session.clone())
    }

    /// Case-insensitive substring search over titles, in set order.
    ///
    /// The returned iterator filters lazily; an empty or blank query yields
    /// the whole set.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a DemoSession> + use<'a> {
        let needle = query.trim().to_lowercase();
        self.sessions
            .iter()
            .filter(move |s| needle.is_empty() || s.title.to_lowercase().contains(&needle))
    }

    /// Counts by status, recomputed on every call.
    pub fn stats(&self) -> SessionStats {
        SessionStats::from_sessions(&self.sessions)
    }

    /// Counts plus average duration and completion rate.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_sessions(&self.sessions)
    }

    pub fn get(&self, id: &SessionId) -> Option<&DemoSession> {
        self.sessions.iter().find(|s| s.id == *id)
    }

    /// Resolves a full id or a unique id prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&DemoSession> {
        let mut matches = self.sessions.iter().filter(|s| s.id.matches_prefix(prefix));
        match (matches.next(), matches.next()) {
            (Some(session), None) => Some(session),
            _ => None,
        }
    }

    /// All sessions, newest first.
    pub fn sessions(&self) -> &[DemoSession] {
        &self.sessions
    }

    /// The session currently recording, if any.
    pub fn active_session(&self) -> Option<&DemoSession> {
        self.sessions.iter().find(|s| s.is_recording)
    }

    pub fn has_active_recording(&self) -> bool {
        self.active_session().is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Replaces the set with the given fixtures, keeping their order.
    ///
    /// A fixture with `Active` status is seeded as a live recording that
    /// started `duration_seconds` ago, or at the earliest representable time
    /// if that lies out of range.
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyActive` if more than one fixture is active; the
    /// existing set is left untouched in that case.
    pub fn seed(&mut self, fixtures: &[SessionFixture]) -> Result<(), SessionError> {
        let now = self.clock.now();
        let mut seeded: Vec<DemoSession> = Vec::with_capacity(fixtures.len());

        for fixture in fixtures {
            let session = if fixture.status == SessionStatus::Active {
                if let Some(active) = seeded.iter().find(|s| s.is_recording) {
                    return Err(SessionError::SessionAlreadyActive {
                        active_id: active.id.to_string(),
                    });
                }
                let started = i64::try_from(fixture.duration_seconds)
                    .ok()
                    .and_then(Duration::try_seconds)
                    .and_then(|elapsed| now.checked_sub_signed(elapsed))
                    .unwrap_or_else(|| {
                        tracing::warn!(
                            "[SessionLifecycle] Fixture '{}' duration {}s is out of range, starting at the earliest time",
                            fixture.title,
                            fixture.duration_seconds
                        );
                        DateTime::<Utc>::MIN_UTC
                    });
                DemoSession::started(fixture.title.to_string(), started)
            } else {
                DemoSession {
                    created_at: fixture.recorded_at().unwrap_or(now),
                    duration_seconds: fixture.duration_seconds,
                    status: fixture.status,
                    is_recording: false,
                    ..DemoSession::started(fixture.title.to_string(), now)
                }
            };
            seeded.push(session);
        }

        tracing::debug!("[SessionLifecycle] Seeded {} sessions", seeded.len());
        self.sessions = seeded;
        Ok(())
    }

    /// Discards every session, including one that is still recording.
    pub fn reset(&mut self) {
        if let Some(active) = self.active_session() {
            tracing::warn!(
                "[SessionLifecycle] Discarding recording session on reset: id={}",
                active.id
            );
        }
        self.sessions.clear();
    }
}

impl Default for SessionLifecycle {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod tests;
