//! `SQLite` implementation of [`CounterStore`].

use std::future::Future;

use sqlx::SqlitePool;

use recordhub_app::ports::CounterStore;
use recordhub_domain::error::RecordHubError;

use crate::error::StorageError;

// Single statement: SQLite holds the write lock for its whole duration, so
// concurrent callers are serialized without any application-side locking.
const NEXT_VALUE: &str = r"
    INSERT INTO counters (name, seq) VALUES (?, 1)
    ON CONFLICT (name) DO UPDATE SET seq = seq + 1
    RETURNING seq
";

const CURRENT_VALUE: &str = "SELECT seq FROM counters WHERE name = ?";

/// `SQLite`-backed sequence counters.
#[derive(Clone)]
pub struct SqliteCounterStore {
    pool: SqlitePool,
}

impl SqliteCounterStore {
    /// Create a new counter store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CounterStore for SqliteCounterStore {
    fn next_value(&self, key: &str) -> impl Future<Output = Result<i64, RecordHubError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            let seq: i64 = sqlx::query_scalar(NEXT_VALUE)
                .bind(key)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(seq)
        }
    }

    fn current_value(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<i64>, RecordHubError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            let seq: Option<i64> = sqlx::query_scalar(CURRENT_VALUE)
                .bind(key)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(seq)
        }
    }
}
