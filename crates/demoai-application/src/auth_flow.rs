//! Credential submission with a simulated backend.
//!
//! `AuthFlow` validates an [`AuthAttempt`] and hands it to an [`AuthBackend`].
//! Only one submission may be outstanding at a time; a second one is
//! rejected with `AlreadyInFlight` instead of being queued.

use async_trait::async_trait;
use demoai_core::auth::{AuthAttempt, AuthFlowState, UserIdentity};
use demoai_core::config::AuthConfig;
use demoai_core::error::AuthError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Backend that turns valid credentials into an identity.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Authenticates credentials that already passed validation.
    ///
    /// # Errors
    ///
    /// `AuthError::Authentication` if the backend rejects them.
    async fn authenticate(&self, attempt: &AuthAttempt) -> Result<UserIdentity, AuthError>;
}

/// Accepts every attempt after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedAuthBackend {
    latency: Duration,
}

impl SimulatedAuthBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.latency())
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedAuthBackend {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

#[async_trait]
impl AuthBackend for SimulatedAuthBackend {
    async fn authenticate(&self, attempt: &AuthAttempt) -> Result<UserIdentity, AuthError> {
        tracing::debug!(
            "[SimulatedAuthBackend] Authenticating {} ({}), latency {:?}",
            attempt.email,
            attempt.mode,
            self.latency
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(UserIdentity::new(attempt.email.clone()))
    }
}

/// Validates and submits credentials, one submission at a time.
pub struct AuthFlow {
    backend: Arc<dyn AuthBackend>,
    in_flight: AtomicBool,
}

impl AuthFlow {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current loading state, for the submit button.
    pub fn state(&self) -> AuthFlowState {
        if self.in_flight.load(Ordering::Acquire) {
            AuthFlowState::Submitting
        } else {
            AuthFlowState::Idle
        }
    }

    /// Validates `attempt` and, if it passes, authenticates it.
    ///
    /// The flow is `Submitting` from the moment validation passes until the
    /// backend call resolves or this future is dropped.
    ///
    /// # Errors
    ///
    /// - `AlreadyInFlight` if another submission is outstanding
    /// - `InvalidEmail`, `WeakPassword`, `PasswordMismatch` from validation,
    ///   first failure wins
    /// - whatever the backend reports
    pub async fn submit(&self, attempt: &AuthAttempt) -> Result<UserIdentity, AuthError> {
        if self.in_flight.load(Ordering::Acquire) {
            tracing::debug!("[AuthFlow] Rejecting submit: request already in flight");
            return Err(AuthError::AlreadyInFlight);
        }

        attempt.validate().inspect_err(|e| {
            tracing::debug!("[AuthFlow] Validation failed for {:?}: {}", attempt, e);
        })?;

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(AuthError::AlreadyInFlight)?;
        tracing::debug!("[AuthFlow] Submitting {:?}", attempt);

        let identity = self.backend.authenticate(attempt).await?;
        tracing::info!("[AuthFlow] Authenticated {}", identity);
        Ok(identity)
    }
}

/// Holds the in-flight flag; clears it on drop so a cancelled submit
/// leaves the flow `Idle`.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow_with_latency(latency: Duration) -> Arc<AuthFlow> {
        Arc::new(AuthFlow::new(Arc::new(SimulatedAuthBackend::new(latency))))
    }

    #[tokio::test]
    async fn test_valid_login_returns_identity() {
        let flow = flow_with_latency(Duration::ZERO);

        let identity = flow
            .submit(&AuthAttempt::login("ada@demoai.com", "password123"))
            .await
            .unwrap();

        assert_eq!(identity, UserIdentity::new("ada@demoai.com"));
        assert_eq!(flow.state(), AuthFlowState::Idle);
    }

    #[tokio::test]
    async fn test_validation_errors_in_order() {
        let flow = flow_with_latency(Duration::ZERO);

        let err = flow
            .submit(&AuthAttempt::sign_up("nope", "short", "other"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidEmail);

        let err = flow
            .submit(&AuthAttempt::sign_up("a@b.com", "short", "other"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::WeakPassword { min_length: 8 });

        let err = flow
            .submit(&AuthAttempt::sign_up("a@b.com", "longenough", "other"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::PasswordMismatch);
        assert_eq!(flow.state(), AuthFlowState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let flow = flow_with_latency(Duration::from_millis(1500));

        let first = tokio::spawn({
            let flow = flow.clone();
            async move {
                flow.submit(&AuthAttempt::login("a@b.com", "password1"))
                    .await
            }
        });
        tokio::task::yield_now().await;
        assert_eq!(flow.state(), AuthFlowState::Submitting);

        // Even an invalid attempt is rejected as in-flight, not validated
        let second = flow.submit(&AuthAttempt::login("bad", "x")).await;
        assert_eq!(second, Err(AuthError::AlreadyInFlight));

        let identity = first.await.unwrap().unwrap();
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(flow.state(), AuthFlowState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency_is_observed() {
        let flow = flow_with_latency(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        flow.submit(&AuthAttempt::sign_up("a@b.com", "password1", "password1"))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submit_returns_to_idle() {
        let flow = flow_with_latency(Duration::from_secs(10));

        let handle = tokio::spawn({
            let flow = flow.clone();
            async move {
                flow.submit(&AuthAttempt::login("a@b.com", "password1"))
                    .await
            }
        });
        tokio::task::yield_now().await;
        assert_eq!(flow.state(), AuthFlowState::Submitting);

        handle.abort();
        let _ = handle.await;

        assert_eq!(flow.state(), AuthFlowState::Idle);
    }

    #[tokio::test]
    async fn test_backend_rejection_propagates() {
        struct RejectingBackend;

        #[async_trait]
        impl AuthBackend for RejectingBackend {
            async fn authenticate(&self, _: &AuthAttempt) -> Result<UserIdentity, AuthError> {
                Err(AuthError::Authentication("account locked".to_string()))
            }
        }

        let flow = AuthFlow::new(Arc::new(RejectingBackend));
        let err = flow
            .submit(&AuthAttempt::login("a@b.com", "password1"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Authentication("account locked".to_string()));
        assert_eq!(flow.state(), AuthFlowState::Idle);
    }
}
