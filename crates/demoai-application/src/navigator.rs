//! Top-level application navigator.
//!
//! `AppNavigator` owns the screen state, the signed-in identity, the demo
//! flag and the session set. It applies the moves allowed by
//! [`demoai_core::navigation::transition`] together with their side effects,
//! and runs credential submission through [`AuthFlow`].

use crate::auth_flow::AuthFlow;
use demoai_core::auth::{AuthAttempt, AuthFlowState, AuthMode, UserIdentity};
use demoai_core::clock::Clock;
use demoai_core::error::{AuthError, SessionError};
use demoai_core::navigation::{
    AppState, NavigationAction, NavigationSnapshot, after_authentication, transition,
};
use demoai_core::notification::{Notification, NotificationSink};
use demoai_core::session::{DemoSession, SessionId, SessionLifecycle, demo_fixtures};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Result of a credential submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The navigator moved to the dashboard as this user.
    Authenticated(UserIdentity),
    /// The navigator left the auth screen before the result arrived (or was
    /// never on it), so the result was dropped.
    Discarded,
}

struct NavigatorState {
    state: AppState,
    demo_mode: bool,
    identity: Option<UserIdentity>,
    auth_mode: AuthMode,
    /// Bumped whenever the auth screen is left; a submission only applies
    /// if the ticket it started with is still current.
    auth_ticket: u64,
    sessions: SessionLifecycle,
}

impl NavigatorState {
    fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            state: self.state,
            demo_mode: self.demo_mode,
            identity: self.identity.clone(),
        }
    }

    fn leave_auth(&mut self) {
        self.auth_ticket = self.auth_ticket.wrapping_add(1);
    }
}

/// The application's screen state machine.
///
/// All methods take `&self`; internal state sits behind a mutex that is
/// never held across an await.
pub struct AppNavigator {
    inner: Mutex<NavigatorState>,
    auth_flow: Arc<AuthFlow>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationSink>,
    seed_demo_fixtures: bool,
}

impl AppNavigator {
    /// Creates a navigator on the landing screen.
    ///
    /// # Arguments
    ///
    /// * `auth_flow` - Submits credentials from the auth screen
    /// * `clock` - Time source for session and notification timestamps
    /// * `notifier` - Receives outcome notifications
    pub fn new(
        auth_flow: Arc<AuthFlow>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            inner: Mutex::new(NavigatorState {
                state: AppState::Landing,
                demo_mode: false,
                identity: None,
                auth_mode: AuthMode::Login,
                auth_ticket: 0,
                sessions: SessionLifecycle::new(clock.clone()),
            }),
            auth_flow,
            clock,
            notifier,
            seed_demo_fixtures: true,
        }
    }

    /// Whether demo mode starts with the canned sessions (default `true`).
    pub fn with_demo_fixtures(mut self, seed: bool) -> Self {
        self.seed_demo_fixtures = seed;
        self
    }

    fn lock(&self) -> MutexGuard<'_, NavigatorState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers `notification` stamped with the navigator's clock.
    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification.at(self.clock.now()));
    }

    pub fn state(&self) -> AppState {
        self.lock().state
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        self.lock().snapshot()
    }

    /// Number of sessions held, on any screen.
    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    /// Which auth form is shown. "Get started" opens sign-up, "sign in" opens login.
    pub fn auth_mode(&self) -> AuthMode {
        self.lock().auth_mode
    }

    /// Switches between the login and sign-up forms.
    pub fn toggle_auth_mode(&self) -> AuthMode {
        let mut inner = self.lock();
        inner.auth_mode = inner.auth_mode.toggle();
        inner.auth_mode
    }

    pub fn auth_state(&self) -> AuthFlowState {
        self.auth_flow.state()
    }

    /// Applies a user navigation request.
    ///
    /// Requests that are not legal in the current state are ignored.
    ///
    /// # Returns
    ///
    /// The state after the request.
    pub fn dispatch(&self, action: NavigationAction) -> AppState {
        let mut inner = self.lock();
        let from = inner.state;
        let Some(to) = transition(from, action) else {
            tracing::debug!("[AppNavigator] Ignoring {} in {}", action, from);
            return from;
        };

        let mut notification = None;
        match action {
            NavigationAction::GetStarted => inner.auth_mode = AuthMode::SignUp,
            NavigationAction::SignIn => inner.auth_mode = AuthMode::Login,
            NavigationAction::TryDemo => {
                inner.demo_mode = true;
                inner.identity = None;
                inner.sessions.reset();
                if self.seed_demo_fixtures {
                    if let Err(e) = inner.sessions.seed(&demo_fixtures()) {
                        tracing::warn!("[AppNavigator] Could not seed demo sessions: {}", e);
                    }
                }
                notification = Some(Notification::info(
                    "Demo mode",
                    "You're exploring DemoAI with sample sessions.",
                ));
            }
            NavigationAction::CancelToLanding => inner.leave_auth(),
            NavigationAction::Logout => {
                inner.demo_mode = false;
                inner.identity = None;
                inner.sessions.reset();
            }
        }
        inner.state = to;
        tracing::info!("[AppNavigator] {} -> {} ({})", from, to, action);
        debug_assert!(inner.snapshot().is_consistent());
        drop(inner);

        if let Some(notification) = notification {
            self.notify(notification);
        }
        to
    }

    /// Submits credentials from the auth screen.
    ///
    /// The navigator may leave the auth screen while this is pending. In
    /// that case the eventual result is dropped and `Discarded` is returned.
    ///
    /// # Errors
    ///
    /// Anything [`AuthFlow::submit`] reports, while still on the auth screen.
    pub async fn submit_credentials(
        &self,
        attempt: &AuthAttempt,
    ) -> Result<SubmitOutcome, AuthError> {
        let ticket = {
            let inner = self.lock();
            if inner.state != AppState::Auth {
                tracing::debug!(
                    "[AppNavigator] Ignoring credentials submitted in {}",
                    inner.state
                );
                return Ok(SubmitOutcome::Discarded);
            }
            inner.auth_ticket
        };

        let result = self.auth_flow.submit(attempt).await;

        let mut inner = self.lock();
        if inner.auth_ticket != ticket {
            tracing::warn!(
                "[AppNavigator] Discarding auth result for {}: left the auth screen",
                attempt.email
            );
            return Ok(SubmitOutcome::Discarded);
        }

        let identity = match result {
            Ok(identity) => identity,
            Err(e) => {
                drop(inner);
                if !matches!(e, AuthError::AlreadyInFlight) {
                    self.notify(Notification::error("Authentication failed", e.to_string()));
                }
                return Err(e);
            }
        };

        let Some(to) = after_authentication(inner.state) else {
            return Ok(SubmitOutcome::Discarded);
        };
        inner.leave_auth();
        inner.state = to;
        inner.demo_mode = false;
        inner.identity = Some(identity.clone());
        inner.sessions.reset();
        tracing::info!("[AppNavigator] Auth -> {} as {}", to, identity);
        drop(inner);

        let title = match attempt.mode {
            AuthMode::Login => "Welcome back!",
            AuthMode::SignUp => "Account created!",
        };
        self.notify(Notification::success(title, format!("Signed in as {identity}")));
        Ok(SubmitOutcome::Authenticated(identity))
    }

    /// Runs `f` against the session set, only while on the dashboard.
    ///
    /// # Returns
    ///
    /// `None` on any other screen.
    pub fn with_sessions<R>(&self, f: impl FnOnce(&mut SessionLifecycle) -> R) -> Option<R> {
        let mut inner = self.lock();
        if inner.state != AppState::Dashboard {
            tracing::debug!("[AppNavigator] Session access refused in {}", inner.state);
            return None;
        }
        Some(f(&mut inner.sessions))
    }

    /// Starts a recording and announces it.
    ///
    /// Returns `None` when not on the dashboard.
    pub fn start_session(&self, title: Option<&str>) -> Option<Result<DemoSession, SessionError>> {
        let result = self.with_sessions(|sessions| match title {
            Some(title) => sessions.start_named_session(title),
            None => sessions.start_session(),
        })?;
        if let Ok(session) = &result {
            self.notify(Notification::success(
                "Demo session started!",
                format!("\"{}\" is recording. Voice commands are now active.", session.title()),
            ));
        }
        Some(result)
    }

    /// Stops a recording and announces the final duration.
    ///
    /// Returns `None` when not on the dashboard.
    pub fn stop_session(&self, id: &SessionId) -> Option<Result<DemoSession, SessionError>> {
        let result = self.with_sessions(|sessions| sessions.stop_session(id))?;
        if let Ok(session) = &result {
            self.notify(Notification::success(
                "Demo session completed",
                format!("\"{}\" ran for {}.", session.title(), session.duration_label()),
            ));
        }
        Some(result)
    }

    /// Marks a recording as failed and announces it.
    ///
    /// Returns `None` when not on the dashboard.
    pub fn fail_session(
        &self,
        id: &SessionId,
        reason: &str,
    ) -> Option<Result<DemoSession, SessionError>> {
        let result = self.with_sessions(|sessions| sessions.fail_session(id, reason))?;
        if let Ok(session) = &result {
            self.notify(Notification::error(
                "Demo session failed",
                format!("\"{}\": {}", session.title(), reason),
            ));
        }
        Some(result)
    }
}

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;
