#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use taskdeck::{Config, MemoryStore, Priority, Store, TaskDraft};

/// Opt-in log output for debugging test failures: RUST_LOG=debug cargo test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Store over an in-memory blob store with sample seeding off, so tests
/// start from empty collections.
pub fn empty_store() -> Store<MemoryStore> {
    init_tracing();
    let config = Config {
        seed_sample_tasks: false,
        ..Config::default()
    };
    Store::new(MemoryStore::new(), config)
}

/// Store with an active session for `dana@example.com`.
pub fn logged_in_store() -> Store<MemoryStore> {
    let mut store = empty_store();
    store
        .login("dana@example.com", "irrelevant")
        .expect("login");
    store
}

pub fn due(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn due_in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

pub fn draft(title: &str, due_date: DateTime<Utc>, priority: Priority) -> TaskDraft {
    TaskDraft::new(title, due_date, priority)
}
