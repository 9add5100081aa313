//! Domain types and state engines for the DemoAI app.
//!
//! Nothing here performs I/O. Storage, configuration files and the
//! simulated backend live in the application and infrastructure crates,
//! behind the traits declared in this crate.

pub mod auth;
pub mod capability;
pub mod clock;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod session;
pub mod settings;
pub mod validation;

// Re-export common error type
pub use error::{AuthError, DemoError, Result, SessionError, SettingsError};
