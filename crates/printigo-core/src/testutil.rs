//! Test utilities: an in-memory [`DocumentStore`].
//!
//! `MemoryStore` ranks JSON types the way PostgreSQL ranks `jsonb`
//! (`null < string < number < boolean < array < object`), treats a missing
//! field as smaller than any value, and breaks ties by insertion order.
//!
//! Strings compare byte-wise. Postgres compares `jsonb` strings under the
//! database collation, so the two stores only agree on strings whose
//! byte order and collation order coincide, such as ISO-8601 dates.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{DeleteResult, Document, InsertResult, Record, RecordId, UpdateResult};
use crate::query::{Collection, FindQuery, SortDirection};
use crate::traits::DocumentStore;

/// Build a [`Document`] from a `json!` object literal.
///
/// Panics if `value` is not an object.
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

#[derive(Default)]
struct Collections {
    next_seq: u64,
    rows: HashMap<Collection, Vec<(u64, Record)>>,
}

/// In-memory store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Collections>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a database error.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    fn check(&self) -> Result<(), AppError> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(AppError::DatabaseError(message.clone())),
            None => Ok(()),
        }
    }

    /// Number of records in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.rows.get(&collection).map_or(0, Vec::len)
    }

    fn find_sync(&self, collection: Collection, query: FindQuery) -> Result<Vec<Record>, AppError> {
        self.check()?;
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<&(u64, Record)> = inner
            .rows
            .get(&collection)
            .map(|rows| rows.iter().collect())
            .unwrap_or_default();

        if let Some(filter) = &query.filter {
            rows.retain(|(_, r)| r.get(&filter.field) == Some(&filter.value));
        }

        if let Some(sort) = &query.sort {
            rows.sort_by(|(seq_a, a), (seq_b, b)| {
                let ord = compare_fields(a.get(&sort.field), b.get(&sort.field));
                let ord = match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                };
                ord.then(seq_a.cmp(seq_b))
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .take(limit)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn find_one_sync(&self, collection: Collection, id: RecordId) -> Result<Option<Record>, AppError> {
        self.check()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .get(&collection)
            .and_then(|rows| rows.iter().find(|(_, r)| r.id == id))
            .map(|(_, r)| r.clone()))
    }

    fn insert_sync(&self, collection: Collection, document: Document) -> Result<InsertResult, AppError> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_seq += 1;
        let seq = inner.next_seq;
        let id = RecordId::new();
        inner
            .rows
            .entry(collection)
            .or_default()
            .push((seq, Record::new(id, document)));
        Ok(InsertResult::new(id))
    }

    fn update_sync(
        &self,
        collection: Collection,
        id: RecordId,
        set: Document,
    ) -> Result<UpdateResult, AppError> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        let Some((_, record)) = inner
            .rows
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|(_, r)| r.id == id))
        else {
            return Ok(UpdateResult::new(0, 0));
        };

        let before = record.fields.clone();
        record.fields.extend(set);
        let modified = u64::from(before != record.fields);
        Ok(UpdateResult::new(1, modified))
    }

    fn delete_sync(&self, collection: Collection, id: RecordId) -> Result<DeleteResult, AppError> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        let Some(rows) = inner.rows.get_mut(&collection) else {
            return Ok(DeleteResult::new(0));
        };
        let before = rows.len();
        rows.retain(|(_, r)| r.id != id);
        Ok(DeleteResult::new((before - rows.len()) as u64))
    }
}

impl DocumentStore for MemoryStore {
    fn find(
        &self,
        collection: Collection,
        query: FindQuery,
    ) -> BoxFuture<'_, Result<Vec<Record>, AppError>> {
        futures::future::ready(self.find_sync(collection, query)).boxed()
    }

    fn find_one(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> BoxFuture<'_, Result<Option<Record>, AppError>> {
        futures::future::ready(self.find_one_sync(collection, id)).boxed()
    }

    fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> BoxFuture<'_, Result<InsertResult, AppError>> {
        futures::future::ready(self.insert_sync(collection, document)).boxed()
    }

    fn update_one(
        &self,
        collection: Collection,
        id: RecordId,
        set: Document,
    ) -> BoxFuture<'_, Result<UpdateResult, AppError>> {
        futures::future::ready(self.update_sync(collection, id, set)).boxed()
    }

    fn delete_one(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> BoxFuture<'_, Result<DeleteResult, AppError>> {
        futures::future::ready(self.delete_sync(collection, id)).boxed()
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), AppError>> {
        futures::future::ready(self.check()).boxed()
    }
}

// ---------------------------------------------------------------------------
// jsonb ordering
// ---------------------------------------------------------------------------

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Compare two optional field values; a missing field sorts below everything.
pub fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_json(a, b),
    }
}

/// Total order over JSON values following `jsonb`'s type ranking, with
/// byte-wise string comparison.
pub fn compare_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y)
                .map(|(a, b)| compare_json(a, b))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Value::Object(x), Value::Object(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| a.to_string().cmp(&b.to_string())),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
