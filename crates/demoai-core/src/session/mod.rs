//! Demo session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session entity (`DemoSession`, `SessionId`, `SessionStatus`)
//! - `lifecycle`: Start/stop/fail, search and aggregation (`SessionLifecycle`)
//! - `stats`: Derived counts and dashboard figures
//! - `fixtures`: Canned sessions for demo mode
//!
//! # Usage
//!
//! ```
//! use demoai_core::session::{SessionLifecycle, SessionStatus};
//!
//! let mut lifecycle = SessionLifecycle::default();
//! let session = lifecycle.start_session().unwrap();
//! let stopped = lifecycle.stop_session(&session.id()).unwrap();
//! assert_eq!(stopped.status(), SessionStatus::Completed);
//! ```

mod fixtures;
mod lifecycle;
mod model;
mod stats;

// Re-export public API
pub use fixtures::{SessionFixture, demo_fixtures};
pub use lifecycle::SessionLifecycle;
pub use model::{DemoSession, SessionId, SessionStatus, TranscriptStatus, format_duration};
pub use stats::{SessionStats, SessionSummary};
