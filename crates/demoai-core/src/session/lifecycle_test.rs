use super::SessionLifecycle;
use crate::clock::{Clock, ManualClock};
use crate::error::SessionError;
use crate::session::fixtures::{SessionFixture, demo_fixtures};
use crate::session::model::{SessionId, SessionStatus, TranscriptStatus};
use crate::session::stats::SessionStats;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

fn lifecycle_with_clock() -> (SessionLifecycle, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    (SessionLifecycle::new(clock.clone()), clock)
}

#[test]
fn test_start_session_creates_active_recording_session() {
    let (mut lifecycle, clock) = lifecycle_with_clock();

    let session = lifecycle.start_session().unwrap();

    assert_eq!(session.status(), SessionStatus::Active);
    assert!(session.is_recording());
    assert_eq!(session.duration_seconds(), 0);
    assert_eq!(session.created_at(), clock.now());
    assert_eq!(session.title(), "Demo Session 1");
    assert_eq!(lifecycle.len(), 1);
    assert_eq!(lifecycle.active_session().map(|s| s.id()), Some(session.id()));
}

#[test]
fn test_second_start_without_stop_fails() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();

    let first = lifecycle.start_session().unwrap();
    let err = lifecycle.start_session().unwrap_err();

    assert_eq!(
        err,
        SessionError::SessionAlreadyActive {
            active_id: first.id().to_string()
        }
    );
    assert_eq!(lifecycle.len(), 1);
}

#[test]
fn test_stop_session_completes_and_keeps_session() {
    let (mut lifecycle, clock) = lifecycle_with_clock();
    let session = lifecycle.start_session().unwrap();

    clock.advance(Duration::seconds(95));
    let stopped = lifecycle.stop_session(&session.id()).unwrap();

    assert_eq!(stopped.status(), SessionStatus::Completed);
    assert!(!stopped.is_recording());
    assert_eq!(stopped.duration_seconds(), 95);
    assert_eq!(stopped.duration_label(), "1:35");

    let stored = lifecycle.get(&session.id()).unwrap();
    assert_eq!(stored, &stopped);
    assert!(!lifecycle.has_active_recording());
}

#[test]
fn test_stop_unknown_session() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    let id = SessionId::new();

    let err = lifecycle.stop_session(&id).unwrap_err();

    assert_eq!(err, SessionError::NoSuchSession { id: id.to_string() });
}

#[test]
fn test_stop_twice_reports_not_recording() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    let session = lifecycle.start_session().unwrap();
    lifecycle.stop_session(&session.id()).unwrap();

    let err = lifecycle.stop_session(&session.id()).unwrap_err();

    assert_eq!(
        err,
        SessionError::NotRecording {
            id: session.id().to_string()
        }
    );
}

#[test]
fn test_fail_session_records_reason_and_frees_recording_slot() {
    let (mut lifecycle, clock) = lifecycle_with_clock();
    let session = lifecycle.start_session().unwrap();
    clock.advance(Duration::seconds(12));

    let failed = lifecycle
        .fail_session(&session.id(), "microphone disconnected")
        .unwrap();

    assert_eq!(failed.status(), SessionStatus::Failed);
    assert!(!failed.is_recording());
    assert_eq!(failed.duration_seconds(), 12);
    assert_eq!(failed.failure_reason(), Some("microphone disconnected"));
    assert!(lifecycle.start_session().is_ok());
}

#[test]
fn test_backwards_clock_yields_zero_duration() {
    let (mut lifecycle, clock) = lifecycle_with_clock();
    let session = lifecycle.start_session().unwrap();
    clock.advance(Duration::seconds(-30));

    let stopped = lifecycle.stop_session(&session.id()).unwrap();

    assert_eq!(stopped.duration_seconds(), 0);
}

#[test]
fn test_sessions_are_newest_first() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    let first = lifecycle.start_named_session("First").unwrap();
    lifecycle.stop_session(&first.id()).unwrap();
    let second = lifecycle.start_named_session("Second").unwrap();

    let titles: Vec<&str> = lifecycle.sessions().iter().map(|s| s.title()).collect();
    assert_eq!(titles, vec!["Second", "First"]);
    assert_eq!(lifecycle.sessions()[0].id(), second.id());
}

#[test]
fn test_at_most_one_recording_across_many_operations() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    for i in 0..5 {
        let session = lifecycle.start_named_session(format!("Run {i}")).unwrap();
        assert!(lifecycle.start_session().is_err());
        if i % 2 == 0 {
            lifecycle.stop_session(&session.id()).unwrap();
        } else {
            lifecycle.fail_session(&session.id(), "timeout").unwrap();
        }
        let recording = lifecycle.sessions().iter().filter(|s| s.is_recording()).count();
        assert_eq!(recording, 0);
    }
    assert_eq!(lifecycle.len(), 5);
}

#[test]
fn test_search_is_case_insensitive_and_ordered() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    let a = lifecycle.start_named_session("Feature Tour").unwrap();
    lifecycle.stop_session(&a.id()).unwrap();
    let b = lifecycle.start_named_session("Demo Session 1").unwrap();
    lifecycle.stop_session(&b.id()).unwrap();

    let hits: Vec<&str> = lifecycle.search("demo").map(|s| s.title()).collect();
    assert_eq!(hits, vec!["Demo Session 1"]);

    let hits: Vec<&str> = lifecycle.search("TOUR").map(|s| s.title()).collect();
    assert_eq!(hits, vec!["Feature Tour"]);
}

#[test]
fn test_empty_search_returns_everything_in_order() {
    let (mut lifecycle, clock) = lifecycle_with_clock();
    lifecycle.seed(&demo_fixtures()).unwrap();
    clock.advance(Duration::seconds(1));

    let all: Vec<_> = lifecycle.search("").map(|s| s.id()).collect();
    let expected: Vec<_> = lifecycle.sessions().iter().map(|s| s.id()).collect();
    assert_eq!(all, expected);
    assert_eq!(lifecycle.search("   ").count(), 4);
    assert_eq!(lifecycle.search("no such title").count(), 0);
}

#[test]
fn test_stats_follow_the_set() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    assert_eq!(lifecycle.stats(), SessionStats::default());

    let one = lifecycle.start_session().unwrap();
    lifecycle.stop_session(&one.id()).unwrap();
    let two = lifecycle.start_session().unwrap();
    lifecycle.fail_session(&two.id(), "network").unwrap();
    lifecycle.start_session().unwrap();

    assert_eq!(
        lifecycle.stats(),
        SessionStats {
            total: 3,
            active: 1,
            completed: 1,
            failed: 1,
        }
    );

    lifecycle.reset();
    assert_eq!(lifecycle.stats().total, 0);
}

#[test]
fn test_stats_three_created_two_completed() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    for _ in 0..2 {
        let session = lifecycle.start_session().unwrap();
        lifecycle.stop_session(&session.id()).unwrap();
    }
    lifecycle.start_session().unwrap();

    let stats = lifecycle.stats();
    assert_eq!((stats.total, stats.active, stats.completed, stats.failed), (3, 1, 2, 0));
}

#[test]
fn test_summary_average_and_completion_rate() {
    let (mut lifecycle, clock) = lifecycle_with_clock();

    let summary = lifecycle.summary();
    assert_eq!(summary.average_duration_seconds, None);
    assert_eq!(summary.completion_rate_percent, None);

    let a = lifecycle.start_session().unwrap();
    clock.advance(Duration::seconds(60));
    lifecycle.stop_session(&a.id()).unwrap();

    let b = lifecycle.start_session().unwrap();
    clock.advance(Duration::seconds(121));
    lifecycle.stop_session(&b.id()).unwrap();

    lifecycle.start_session().unwrap();

    let summary = lifecycle.summary();
    assert_eq!(summary.average_duration_seconds, Some(91));
    assert_eq!(summary.completion_rate_percent, Some(67));
}

#[test]
fn test_seed_demo_fixtures() {
    let (mut lifecycle, clock) = lifecycle_with_clock();

    lifecycle.seed(&demo_fixtures()).unwrap();

    assert_eq!(lifecycle.len(), 4);
    assert_eq!(lifecycle.sessions()[0].title(), "Product Tour - Landing Page");
    assert_eq!(lifecycle.sessions()[0].duration_seconds(), 332);
    let transcripts: Vec<TranscriptStatus> = lifecycle
        .sessions()
        .iter()
        .map(|s| s.transcript_status())
        .collect();
    assert_eq!(
        transcripts,
        vec![
            TranscriptStatus::Available,
            TranscriptStatus::Available,
            TranscriptStatus::Processing,
            TranscriptStatus::Available,
        ]
    );

    let active = lifecycle.active_session().unwrap();
    assert_eq!(active.title(), "Onboarding Walkthrough");
    assert_eq!(active.created_at(), clock.now() - Duration::seconds(138));

    // Stopping the live fixture stamps the elapsed recording time
    let id = active.id();
    clock.advance(Duration::seconds(2));
    let stopped = lifecycle.stop_session(&id).unwrap();
    assert_eq!(stopped.duration_seconds(), 140);
}

#[test]
fn test_seed_rejects_two_active_fixtures() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    let existing = lifecycle.start_session().unwrap();
    let live = SessionFixture {
        title: "Live",
        recorded_on: (2024, 1, 1),
        duration_seconds: 10,
        status: SessionStatus::Active,
    };

    let err = lifecycle.seed(&[live.clone(), live]).unwrap_err();

    assert!(matches!(err, SessionError::SessionAlreadyActive { .. }));
    assert_eq!(lifecycle.sessions()[0].id(), existing.id());
}

#[test]
fn test_seed_clamps_unrepresentable_live_duration() {
    let (mut lifecycle, clock) = lifecycle_with_clock();
    let live = |duration_seconds| SessionFixture {
        title: "Marathon",
        recorded_on: (2024, 1, 1),
        duration_seconds,
        status: SessionStatus::Active,
    };

    for duration_seconds in [u64::MAX, i64::MAX as u64, 10_000_000_000_000_000] {
        lifecycle.seed(&[live(duration_seconds)]).unwrap();

        let seeded = &lifecycle.sessions()[0];
        assert!(seeded.is_recording());
        assert_eq!(seeded.created_at(), DateTime::<Utc>::MIN_UTC);
        assert!(seeded.created_at() <= clock.now());
    }

    lifecycle.seed(&[live(90)]).unwrap();
    assert_eq!(
        lifecycle.sessions()[0].created_at(),
        clock.now() - Duration::seconds(90)
    );
}

#[test]
fn test_find_by_prefix() {
    let (mut lifecycle, _clock) = lifecycle_with_clock();
    let session = lifecycle.start_session().unwrap();
    let full = session.id().to_string();

    assert_eq!(
        lifecycle.find_by_prefix(&full[..8]).map(|s| s.id()),
        Some(session.id())
    );
    assert!(lifecycle.find_by_prefix("").is_none());
}
