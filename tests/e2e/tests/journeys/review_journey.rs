//! Review journeys: whole sessions against a real SQLite database
//!
//! Facts are seeded into a temporary database, loaded as a queue, reviewed
//! through a scripted presenter at a fixed clock, and read back from disk.

use chrono::{Duration, TimeZone, Utc};
use pankito_core::{
    truncate_to_day, FixedClock, ReviewError, ReviewQueue, ReviewSession, ScheduleUpdate,
    SessionConfig, MAX_INTERVAL,
};
use pankito_e2e_tests::harness::TestDatabaseManager;
use pankito_e2e_tests::mocks::{FactFixtures, FlakyStore, ScriptedPresenter};

fn seeded(count: usize) -> (TestDatabaseManager, i64, Vec<i64>) {
    let db = TestDatabaseManager::new_temp();
    let deck = db.create_deck("Journey");
    let due = FactFixtures::review_time() - Duration::hours(2);
    let ids = db.seed_due_at(&deck, "Journey", due, count);
    (db, deck.id, ids)
}

#[test]
fn test_passing_review_is_persisted() {
    let (mut db, deck_id, ids) = seeded(1);
    let now = FactFixtures::review_time();

    let queue = ReviewQueue::load_due(&db.storage, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::with_scores(["4"]);
    let summary = ReviewSession::new(queue, &mut presenter, &db.storage)
        .with_clock(FixedClock(now))
        .run()
        .unwrap();

    assert_eq!(summary.presented, 1);
    assert_eq!(summary.passed, 1);
    assert_eq!(presenter.completions, 1);

    db.reopen();
    let fact = db.fact(ids[0]);
    assert_eq!(fact.repetition, 1);
    assert_eq!(fact.interval, 1);
    assert!((fact.ease_factor - 1.78).abs() < 1e-9);
    assert_eq!(fact.next_review, truncate_to_day(now + Duration::days(1)));

    // Not due again until tomorrow
    assert!(db.storage.get_due_facts(deck_id, now).unwrap().is_empty());
}

#[test]
fn test_failed_fact_returns_within_session() {
    let (db, deck_id, ids) = seeded(2);
    let now = FactFixtures::review_time();
    let first_due = db.fact(ids[0]).next_review;

    let queue = ReviewQueue::load_due(&db.storage, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::with_scores(["1", "5", "4"]);
    let summary = ReviewSession::new(queue, &mut presenter, &db.storage)
        .with_clock(FixedClock(now))
        .run()
        .unwrap();

    assert_eq!(presenter.shown, vec![ids[0], ids[1], ids[0]]);
    assert_eq!(summary.presented, 3);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);

    // Fail reset the count, then the retry pass started it again
    let first = db.fact(ids[0]);
    assert_eq!(first.repetition, 1);
    assert!((first.ease_factor - 1.3).abs() < 1e-9);
    assert_ne!(first.next_review, first_due);

    let second = db.fact(ids[1]);
    assert_eq!(second.repetition, 1);
    assert!((second.ease_factor - 2.6).abs() < 1e-9);
}

#[test]
fn test_failed_review_keeps_due_date() {
    let (db, deck_id, ids) = seeded(1);
    let now = FactFixtures::review_time();
    let before = db.fact(ids[0]);

    let queue = ReviewQueue::load_due(&db.storage, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::with_scores(["2"]);
    let mut session =
        ReviewSession::new(queue, &mut presenter, &db.storage).with_clock(FixedClock(now));

    let outcome = session.review_next().unwrap().unwrap();
    assert!(!outcome.passed());
    assert_eq!(session.queue().len(), 1);

    let after = db.fact(ids[0]);
    assert_eq!(after.repetition, 0);
    assert_eq!(after.next_review, before.next_review);
    assert!(after.ease_factor < before.ease_factor);
}

#[test]
fn test_save_failure_does_not_stop_session() {
    let (db, deck_id, ids) = seeded(2);
    let now = FactFixtures::review_time();

    let store = FlakyStore::new(&db.storage, [1]);
    let queue = ReviewQueue::load_due(&store, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::with_scores(["5", "5"]);
    let summary = ReviewSession::new(queue, &mut presenter, &store)
        .with_clock(FixedClock(now))
        .run()
        .unwrap();

    assert_eq!(summary.passed, 2);
    assert_eq!(summary.save_failures, 1);
    assert_eq!(store.attempts(), 2);

    // First write was lost, second landed
    assert_eq!(db.fact(ids[0]).repetition, 0);
    assert_eq!(db.fact(ids[1]).repetition, 1);
}

#[test]
fn test_unusable_scores_are_reprompted() {
    let (db, deck_id, ids) = seeded(1);
    let now = FactFixtures::review_time();

    let queue = ReviewQueue::load_due(&db.storage, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::with_scores(["seven", "9", "5"]);
    let summary = ReviewSession::new(queue, &mut presenter, &db.storage)
        .with_clock(FixedClock(now))
        .run()
        .unwrap();

    assert_eq!(presenter.rejected, vec!["seven".to_string(), "9".to_string()]);
    assert_eq!(summary.presented, 1);
    assert_eq!(db.fact(ids[0]).repetition, 1);
}

#[test]
fn test_exhausted_attempts_leave_fact_untouched() {
    let (db, deck_id, ids) = seeded(1);
    let now = FactFixtures::review_time();
    let before = db.fact(ids[0]);

    let queue = ReviewQueue::load_due(&db.storage, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::with_scores(["x", "y"]);
    let mut session = ReviewSession::new(queue, &mut presenter, &db.storage)
        .with_clock(FixedClock(now))
        .with_config(SessionConfig {
            max_quality_attempts: 2,
        });

    let err = session.run().unwrap_err();
    assert!(matches!(err, ReviewError::InvalidQualityInput { .. }));
    assert_eq!(session.queue().len(), 1);

    let after = db.fact(ids[0]);
    assert_eq!(after.repetition, before.repetition);
    assert_eq!(after.next_review, before.next_review);
}

#[test]
fn test_mature_fact_interval_grows_from_disk() {
    let db = TestDatabaseManager::new_temp();
    let deck = db.create_deck("Growth");
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let id = db.seed_due_at(&deck, "Growth", start, 1)[0];

    // Three perfect reviews on the day each becomes due: intervals 1, 6, 17
    let mut now = start;
    let mut intervals = Vec::new();
    for _ in 0..3 {
        let queue = ReviewQueue::load_due(&db.storage, deck.id, now).unwrap();
        assert_eq!(queue.len(), 1);
        let mut presenter = ScriptedPresenter::with_scores(["5"]);
        ReviewSession::new(queue, &mut presenter, &db.storage)
            .with_clock(FixedClock(now))
            .run()
            .unwrap();

        let fact = db.fact(id);
        intervals.push(fact.interval);
        now = fact.next_review + Duration::hours(9);
    }

    assert_eq!(intervals, vec![1, 6, 17]);
}

#[test]
fn test_closed_input_is_a_presentation_error() {
    let (db, deck_id, _) = seeded(1);
    let now = FactFixtures::review_time();

    let queue = ReviewQueue::load_due(&db.storage, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::default();
    let err = ReviewSession::new(queue, &mut presenter, &db.storage)
        .with_clock(FixedClock(now))
        .run()
        .unwrap_err();

    assert!(matches!(err, ReviewError::Presentation(_)));
}

#[test]
fn test_long_interval_pass_keeps_deck_readable() {
    let (db, deck_id, ids) = seeded(1);
    let now = FactFixtures::review_time();
    db.storage
        .update_schedule(&ScheduleUpdate {
            fact_id: ids[0],
            repetition: 5,
            ease_factor: 2.5,
            interval: 50_000_000,
            next_review: None,
        })
        .unwrap();

    let queue = ReviewQueue::load_due(&db.storage, deck_id, now).unwrap();
    let mut presenter = ScriptedPresenter::with_scores(["5"]);
    let summary = ReviewSession::new(queue, &mut presenter, &db.storage)
        .with_clock(FixedClock(now))
        .run()
        .unwrap();

    assert_eq!(summary.save_failures, 0);
    let fact = db.fact(ids[0]);
    assert_eq!(fact.interval, MAX_INTERVAL);
    assert!(fact.next_review > now);
    assert_eq!(db.storage.list_facts(deck_id).unwrap().len(), 1);
    assert!(ReviewQueue::load_due(&db.storage, deck_id, now).unwrap().is_empty());
}
