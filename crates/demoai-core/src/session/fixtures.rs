//! Sessions shown to visitors who enter demo mode without signing up.

use super::model::SessionStatus;
use chrono::{DateTime, NaiveDate, Utc};

/// A canned session used to populate the dashboard in demo mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFixture {
    pub title: &'static str,
    /// Recording date as (year, month, day).
    pub recorded_on: (i32, u32, u32),
    pub duration_seconds: u64,
    pub status: SessionStatus,
}

impl SessionFixture {
    /// Start of the recording, 10:00 UTC on `recorded_on`.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        let (year, month, day) = self.recorded_on;
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// The demo-mode session set, newest first.
///
/// "Onboarding Walkthrough" is still in progress, so a freshly seeded demo
/// dashboard has one live recording.
pub fn demo_fixtures() -> Vec<SessionFixture> {
    vec![
        SessionFixture {
            title: "Product Tour - Landing Page",
            recorded_on: (2024, 1, 15),
            duration_seconds: 5 * 60 + 32,
            status: SessionStatus::Completed,
        },
        SessionFixture {
            title: "Feature Demo - Dashboard",
            recorded_on: (2024, 1, 14),
            duration_seconds: 3 * 60 + 45,
            status: SessionStatus::Completed,
        },
        SessionFixture {
            title: "Onboarding Walkthrough",
            recorded_on: (2024, 1, 13),
            duration_seconds: 2 * 60 + 18,
            status: SessionStatus::Active,
        },
        SessionFixture {
            title: "API Integration Demo",
            recorded_on: (2024, 1, 12),
            duration_seconds: 7 * 60 + 21,
            status: SessionStatus::Completed,
        },
    ]
}
