use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;

/// A schema-free JSON object as stored in a collection.
pub type Document = Map<String, Value>;

/// Key under which a record's identifier is exposed to clients.
pub const ID_FIELD: &str = "_id";

/// Opaque record key assigned by the store at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for RecordId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AppError::MalformedIdentifier(s.to_string()))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored document together with its identifier.
///
/// Serializes flat: `{"_id": "...", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Document,
}

impl Record {
    pub fn new(id: RecordId, fields: Document) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Acknowledgement returned by an insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: RecordId,
}

impl InsertResult {
    pub fn new(inserted_id: RecordId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Acknowledgement returned by an update. Upserts never happen through this API,
/// so `upserted_id` is always `None` and `upserted_count` always zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<RecordId>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

/// Acknowledgement returned by a delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// The mutable part of a review. Missing fields are written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewUpdate {
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub ratings: Option<Value>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ReviewUpdate {
    /// The `$set` document: always exactly `date`, `ratings` and `details`.
    pub fn into_document(self) -> Document {
        let mut set = Document::new();
        set.insert("date".into(), self.date.unwrap_or(Value::Null));
        set.insert("ratings".into(), self.ratings.unwrap_or(Value::Null));
        set.insert("details".into(), self.details.unwrap_or(Value::Null));
        set
    }
}

/// Strip any client-supplied `_id` so the store alone assigns keys.
pub fn without_id(mut document: Document) -> Document {
    document.remove(ID_FIELD);
    document
}
