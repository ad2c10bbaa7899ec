//! # recordhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` document store using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `recordhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Keep one shared `counters` table and one `documents` table partitioned
//!   by collection name, with JSON document bodies
//!
//! ## Dependency rule
//! Depends on `recordhub-app` (for port traits) and `recordhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod counter_store;
mod document_repo;
mod error;
mod pool;

pub use counter_store::SqliteCounterStore;
pub use document_repo::SqliteDocumentRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
