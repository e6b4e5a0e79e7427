use futures::future::BoxFuture;
use sqlx::types::Json;
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use printigo_core::error::AppError;
use printigo_core::models::{DeleteResult, Document, InsertResult, Record, RecordId, UpdateResult};
use printigo_core::query::{Collection, FindQuery, SortDirection};
use printigo_core::traits::DocumentStore;

/// Document store over PostgreSQL: one table per collection, each row a
/// `jsonb` document keyed by a generated UUID.
///
/// Ordering compares `doc -> field` as `jsonb`; missing fields sort as SQL
/// `NULL` (first ascending, last descending) and ties fall back to `seq`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: Pool<Postgres>,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Document>,
}

impl From<DocumentRow> for Record {
    fn from(row: DocumentRow) -> Self {
        Record::new(row.id.into(), row.doc.0)
    }
}

/// A stored document that no longer decodes is a serialization failure;
/// everything else is a database failure.
fn store_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::ColumnDecode { index, source } => {
            match source.downcast::<serde_json::Error>() {
                Ok(json) => AppError::SerializationError(*json),
                Err(source) => AppError::DatabaseError(format!("column {index}: {source}")),
            }
        }
        other => AppError::DatabaseError(other.to_string()),
    }
}

/// Build the `SELECT` for a find. Parameters are numbered in bind order:
/// filter field, filter value, sort field, limit.
fn find_sql(collection: Collection, query: &FindQuery) -> String {
    let mut sql = format!("SELECT id, doc FROM {collection}");
    let mut param = 0;

    if query.filter.is_some() {
        sql.push_str(&format!(
            " WHERE doc -> ${}::text = ${}::jsonb",
            param + 1,
            param + 2
        ));
        param += 2;
    }

    match &query.sort {
        Some(sort) => {
            param += 1;
            let order = match sort.direction {
                SortDirection::Ascending => "ASC NULLS FIRST",
                SortDirection::Descending => "DESC NULLS LAST",
            };
            sql.push_str(&format!(" ORDER BY doc -> ${param}::text {order}, seq ASC"));
        }
        None => sql.push_str(" ORDER BY seq ASC"),
    }

    if query.limit.is_some() {
        param += 1;
        sql.push_str(&format!(" LIMIT ${param}"));
    }

    sql
}

fn update_sql(collection: Collection) -> String {
    format!(
        r#"
        WITH target AS (
            SELECT id, doc FROM {collection} WHERE id = $1 FOR UPDATE
        )
        UPDATE {collection} SET doc = {collection}.doc || $2
        FROM target
        WHERE {collection}.id = target.id
        RETURNING target.doc IS DISTINCT FROM {collection}.doc
        "#
    )
}

impl DocumentStore for PgDocumentStore {
    fn find(
        &self,
        collection: Collection,
        query: FindQuery,
    ) -> BoxFuture<'_, Result<Vec<Record>, AppError>> {
        Box::pin(async move {
            let sql = find_sql(collection, &query);
            let mut statement = sqlx::query_as::<_, DocumentRow>(&sql);
            if let Some(filter) = query.filter {
                statement = statement.bind(filter.field).bind(filter.value);
            }
            if let Some(sort) = query.sort {
                statement = statement.bind(sort.field);
            }
            if let Some(limit) = query.limit {
                statement = statement.bind(limit as i64);
            }

            let rows = statement
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;

            tracing::debug!(%collection, count = rows.len(), "find");
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn find_one(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> BoxFuture<'_, Result<Option<Record>, AppError>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, DocumentRow>(&format!(
                "SELECT id, doc FROM {collection} WHERE id = $1"
            ))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

            Ok(row.map(Into::into))
        })
    }

    fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> BoxFuture<'_, Result<InsertResult, AppError>> {
        Box::pin(async move {
            let (id,): (Uuid,) = sqlx::query_as(&format!(
                "INSERT INTO {collection} (doc) VALUES ($1) RETURNING id"
            ))
            .bind(Json(document))
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

            tracing::debug!(%collection, %id, "inserted document");
            Ok(InsertResult::new(id.into()))
        })
    }

    fn update_one(
        &self,
        collection: Collection,
        id: RecordId,
        set: Document,
    ) -> BoxFuture<'_, Result<UpdateResult, AppError>> {
        Box::pin(async move {
            let modified: Option<(bool,)> = sqlx::query_as(&update_sql(collection))
                .bind(id.as_uuid())
                .bind(Json(set))
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

            let result = match modified {
                Some((changed,)) => UpdateResult::new(1, u64::from(changed)),
                None => UpdateResult::new(0, 0),
            };
            tracing::debug!(
                %collection,
                %id,
                matched = result.matched_count,
                modified = result.modified_count,
                "updated document"
            );
            Ok(result)
        })
    }

    fn delete_one(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> BoxFuture<'_, Result<DeleteResult, AppError>> {
        Box::pin(async move {
            let result = sqlx::query(&format!("DELETE FROM {collection} WHERE id = $1"))
                .bind(id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(store_error)?;

            tracing::debug!(%collection, %id, deleted = result.rows_affected(), "deleted document");
            Ok(DeleteResult::new(result.rows_affected()))
        })
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), AppError>> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(store_error)?;
            Ok(())
        })
    }
}
