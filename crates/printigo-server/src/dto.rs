use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use printigo_core::models::{DeleteResult, InsertResult, Record, ReviewUpdate, UpdateResult};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A stored service or review: its identifier plus every stored field.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecordResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id.as_uuid(),
            fields: record.fields,
        }
    }
}

/// Arbitrary JSON object to store as a new service or review.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewDocumentRequest {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateReviewRequest {
    #[schema(value_type = Object)]
    pub date: Option<Value>,
    #[schema(value_type = Object)]
    pub ratings: Option<Value>,
    #[schema(value_type = Object)]
    pub details: Option<Value>,
}

impl From<UpdateReviewRequest> for ReviewUpdate {
    fn from(req: UpdateReviewRequest) -> Self {
        Self {
            date: req.date,
            ratings: req.ratings,
            details: req.details,
        }
    }
}

// ---------------------------------------------------------------------------
// Acknowledgements
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl From<InsertResult> for InsertResponse {
    fn from(r: InsertResult) -> Self {
        Self {
            acknowledged: r.acknowledged,
            inserted_id: r.inserted_id.as_uuid(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
    pub upserted_count: u64,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(r: UpdateResult) -> Self {
        Self {
            acknowledged: r.acknowledged,
            matched_count: r.matched_count,
            modified_count: r.modified_count,
            upserted_id: r.upserted_id.map(|id| id.as_uuid()),
            upserted_count: r.upserted_count,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(r: DeleteResult) -> Self {
        Self {
            acknowledged: r.acknowledged,
            deleted_count: r.deleted_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IssueTokenRequest {
    /// Identity the credential is issued for
    pub email: String,
    /// Any further fields to embed in the credential
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
