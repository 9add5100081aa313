//! Authentication domain types.
//!
//! There is no real identity provider behind these; the application layer
//! runs a simulated submission. What lives here is the credential shape and
//! the order in which credentials are checked.

use crate::error::AuthError;
use crate::validation::{MIN_PASSWORD_LENGTH, is_strong_password, is_valid_email, passwords_match};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

/// Which form the user is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum AuthMode {
    #[default]
    #[strum(serialize = "login")]
    Login,
    #[strum(serialize = "sign-up")]
    SignUp,
}

impl AuthMode {
    /// Flips between the sign-in and create-account forms.
    pub fn toggle(self) -> Self {
        match self {
            Self::Login => Self::SignUp,
            Self::SignUp => Self::Login,
        }
    }

    /// Submit button label while idle.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::SignUp => "Create Account",
        }
    }

    /// Submit button label while the request is outstanding.
    pub fn pending_label(self) -> &'static str {
        match self {
            Self::Login => "Signing In...",
            Self::SignUp => "Creating Account...",
        }
    }
}

/// One submission of the auth form. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthAttempt {
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
    pub mode: AuthMode,
}

impl AuthAttempt {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: None,
            mode: AuthMode::Login,
        }
    }

    pub fn sign_up(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: Some(confirm_password.into()),
            mode: AuthMode::SignUp,
        }
    }

    /// Checks the credentials, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// In order: `InvalidEmail`, `WeakPassword`, then `PasswordMismatch`
    /// (sign-up only; a missing confirmation counts as a mismatch).
    pub fn validate(&self) -> Result<(), AuthError> {
        if !is_valid_email(&self.email) {
            return Err(AuthError::InvalidEmail);
        }
        if !is_strong_password(&self.password) {
            return Err(AuthError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }
        if self.mode == AuthMode::SignUp {
            let confirm = self.confirm_password.as_deref().unwrap_or_default();
            if !passwords_match(&self.password, confirm) {
                return Err(AuthError::PasswordMismatch);
            }
        }
        Ok(())
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for AuthAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthAttempt")
            .field("email", &self.email)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: String,
}

impl UserIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// Whether a submission is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum AuthFlowState {
    #[default]
    Idle,
    Submitting,
}
