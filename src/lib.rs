//! taskdeck - Personal Task Manager Core
//!
//! This library is the state and derivation engine behind a local-first
//! task-management UI: per-user task and notification collections, a mock
//! session layer, durable key-value blob persistence, and pure derived-view
//! computations.
//!
//! # Core Concepts
//!
//! - **Entity store**: one in-memory collection per active session, every
//!   mutation mirrored to durable blobs before it returns
//! - **Blob store**: an injectable key-value persistence seam (file-backed
//!   or in-memory) so the entity logic tests without I/O
//! - **Derived views**: pure date bucketing, monthly statistics, and a
//!   filter/sort pipeline over task snapshots
//!
//! # Module Organization
//!
//! - `config`: configuration loading from `taskdeck.toml`
//! - `dates`: due-date bucketing (overdue / today / tomorrow / this week)
//! - `error`: error types and result aliases
//! - `lock`: file locking and atomic writes for the file-backed store
//! - `notification`: in-app notification records and mutation notices
//! - `query`: task filtering and ordering
//! - `session`: mock user identity
//! - `stats`: monthly statistics aggregation
//! - `storage`: the `BlobStore` trait and its implementations
//! - `store`: the entity store
//! - `task`: task records, drafts, and patches

pub mod config;
pub mod dates;
pub mod error;
pub mod lock;
pub mod notification;
pub mod query;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use notification::{Notification, NotificationKind};
pub use query::{PriorityFilter, StatusFilter, TaskQuery};
pub use session::User;
pub use stats::TaskStats;
pub use storage::{BlobStore, FileStore, MemoryStore};
pub use store::Store;
pub use task::{Priority, Task, TaskDraft, TaskPatch};
