//! Application layer for DemoAI.
//!
//! Use cases that coordinate the core state engines with their
//! collaborators: credential submission, screen navigation and settings.

pub mod auth_flow;
pub mod navigator;
pub mod settings_service;

pub use auth_flow::{AuthBackend, AuthFlow, SimulatedAuthBackend};
pub use navigator::{AppNavigator, SubmitOutcome};
pub use settings_service::SettingsService;
