//! End-to-end test support for Pankito
//!
//! - [`harness`]: throwaway databases seeded with decks and facts
//! - [`mocks`]: scripted presenters, faulty stores, and fact fixtures
