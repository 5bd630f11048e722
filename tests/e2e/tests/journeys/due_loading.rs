//! Due loading: which facts a session starts with

use chrono::{Duration, Utc};
use pankito_core::{truncate_to_day, ReviewQueue};
use pankito_e2e_tests::harness::TestDatabaseManager;

#[test]
fn test_current_facts_are_due() {
    let db = TestDatabaseManager::new_temp();
    let deck = db.create_deck("Current");
    let ids = db.seed_due_today(&deck, 5);

    let queue = ReviewQueue::load_due(&db.storage, deck.id, Utc::now()).unwrap();
    assert_eq!(queue.len(), 5);
    assert_eq!(queue.iter().map(|f| f.id).collect::<Vec<_>>(), ids);
}

#[test]
fn test_past_facts_are_due() {
    let db = TestDatabaseManager::new_temp();
    let deck = db.create_deck("Past");
    db.seed_due_in_past(&deck, 3);

    let queue = ReviewQueue::load_due(&db.storage, deck.id, Utc::now()).unwrap();
    assert_eq!(queue.len(), 3);
}

#[test]
fn test_future_facts_are_not_due() {
    let db = TestDatabaseManager::new_temp();
    let deck = db.create_deck("Future");
    db.seed_due_in_future(&deck, 4);

    let queue = ReviewQueue::load_due(&db.storage, deck.id, Utc::now()).unwrap();
    assert!(queue.is_empty());
}

#[test]
fn test_mixed_due_dates_load_oldest_first() {
    let db = TestDatabaseManager::new_temp();
    let deck = db.create_deck("Mixed");
    let current = db.seed_due_today(&deck, 1);
    db.seed_due_in_future(&deck, 2);
    let past = db.seed_due_in_past(&deck, 1);

    let queue = ReviewQueue::load_due(&db.storage, deck.id, Utc::now()).unwrap();
    let order: Vec<i64> = queue.iter().map(|f| f.id).collect();
    assert_eq!(order, vec![past[0], current[0]]);
}

#[test]
fn test_decks_do_not_leak_into_each_other() {
    let db = TestDatabaseManager::new_temp();
    let spanish = db.create_deck("Spanish");
    let german = db.create_deck("German");
    db.seed_due_today(&spanish, 2);
    db.seed_due_today(&german, 3);

    let now = Utc::now();
    assert_eq!(ReviewQueue::load_due(&db.storage, spanish.id, now).unwrap().len(), 2);
    assert_eq!(ReviewQueue::load_due(&db.storage, german.id, now).unwrap().len(), 3);
}

#[test]
fn test_due_boundary_is_inclusive() {
    let db = TestDatabaseManager::new_temp();
    let deck = db.create_deck("Boundary");
    let midnight = truncate_to_day(Utc::now() + Duration::days(3));
    db.seed_due_at(&deck, "Edge", midnight, 1);

    let just_before = midnight - Duration::microseconds(1);
    assert!(ReviewQueue::load_due(&db.storage, deck.id, just_before).unwrap().is_empty());
    assert_eq!(ReviewQueue::load_due(&db.storage, deck.id, midnight).unwrap().len(), 1);
}
