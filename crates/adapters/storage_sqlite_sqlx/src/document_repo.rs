//! `SQLite` implementation of [`DocumentRepository`].
//!
//! Documents are stored as JSON text in the `body` column, `_id` included,
//! next to an integer `id` column used as the lookup key. Filters are pushed
//! down to `SQLite` through `json_each` so only matching rows are decoded.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use recordhub_app::ports::DocumentRepository;
use recordhub_domain::document::{Document, Fields};
use recordhub_domain::error::RecordHubError;
use recordhub_domain::filter::{Filter, FilterValue};
use recordhub_domain::id::DocumentId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Document`]s.
struct Wrapper(Document);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Document> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let body: String = row.try_get("body")?;

        let mut document: Document =
            serde_json::from_str(&body).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        // The column is authoritative for the key.
        document.id = DocumentId::new(id);

        Ok(Self(document))
    }
}

const INSERT: &str = "INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, body FROM documents WHERE collection = ? AND id = ?";
const UPDATE_BODY: &str = "UPDATE documents SET body = ? WHERE collection = ? AND id = ?";
const DELETE_BY_ID: &str =
    "DELETE FROM documents WHERE collection = ? AND id = ? RETURNING id, body";

/// Build the filtered select for one collection.
///
/// Each condition becomes an `EXISTS` over the top-level members of the body.
/// Integer conditions match JSON integers and reals of equal value; text
/// conditions match JSON strings only.
fn select_matching<'a>(collection: &'a str, filter: &'a Filter) -> QueryBuilder<'a, Sqlite> {
    let mut query = QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
    query.push_bind(collection);

    for (field, value) in filter.conditions() {
        query.push(
            " AND EXISTS (SELECT 1 FROM json_each(documents.body) AS member WHERE member.key = ",
        );
        query.push_bind(field);
        match value {
            FilterValue::Integer(number) => {
                query.push(" AND member.type IN ('integer', 'real') AND member.value = ");
                query.push_bind(*number);
            }
            FilterValue::Text(text) => {
                query.push(" AND member.type = 'text' AND member.value = ");
                query.push_bind(text.as_str());
            }
        }
        query.push(")");
    }

    query.push(" ORDER BY id");
    query
}

/// `SQLite`-backed repository for the documents of one collection.
#[derive(Clone)]
pub struct SqliteDocumentRepository {
    pool: SqlitePool,
    collection: &'static str,
}

impl SqliteDocumentRepository {
    /// Create a new repository for `collection` using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool, collection: &'static str) -> Self {
        Self { pool, collection }
    }
}

impl DocumentRepository for SqliteDocumentRepository {
    fn insert(
        &self,
        document: Document,
    ) -> impl Future<Output = Result<Document, RecordHubError>> + Send {
        let pool = self.pool.clone();
        let collection = self.collection;
        async move {
            let body = serde_json::to_string(&document).map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(collection)
                .bind(document.id.value())
                .bind(body)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            tracing::debug!(collection, id = %document.id, "inserted document");
            Ok(document)
        }
    }

    fn get_by_id(
        &self,
        id: DocumentId,
    ) -> impl Future<Output = Result<Option<Document>, RecordHubError>> + Send {
        let pool = self.pool.clone();
        let collection = self.collection;
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(collection)
                .bind(id.value())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find(
        &self,
        filter: Filter,
    ) -> impl Future<Output = Result<Vec<Document>, RecordHubError>> + Send {
        let pool = self.pool.clone();
        let collection = self.collection;
        async move {
            let rows: Vec<Wrapper> = select_matching(collection, &filter)
                .build_query_as()
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update_fields(
        &self,
        id: DocumentId,
        fields: Fields,
    ) -> impl Future<Output = Result<Option<Document>, RecordHubError>> + Send {
        let pool = self.pool.clone();
        let collection = self.collection;
        async move {
            // Take the write lock up front. A deferred transaction that reads
            // first cannot wait for the lock when another writer holds it.
            let mut tx = pool
                .begin_with("BEGIN IMMEDIATE")
                .await
                .map_err(StorageError::from)?;

            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(collection)
                .bind(id.value())
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            let Some(Wrapper(mut document)) = row else {
                return Ok(None);
            };
            document.merge(fields)?;
            let body = serde_json::to_string(&document).map_err(StorageError::from)?;

            sqlx::query(UPDATE_BODY)
                .bind(body)
                .bind(collection)
                .bind(id.value())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;

            tracing::debug!(collection, %id, "updated document");
            Ok(Some(document))
        }
    }

    fn delete(
        &self,
        id: DocumentId,
    ) -> impl Future<Output = Result<Option<Document>, RecordHubError>> + Send {
        let pool = self.pool.clone();
        let collection = self.collection;
        async move {
            let row: Option<Wrapper> = sqlx::query_as(DELETE_BY_ID)
                .bind(collection)
                .bind(id.value())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            if row.is_some() {
                tracing::debug!(collection, %id, "deleted document");
            }
            Ok(Wrapper::maybe(row))
        }
    }
}
