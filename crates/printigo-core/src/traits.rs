use futures::future::BoxFuture;

use crate::error::AppError;
use crate::identity::Claims;
use crate::models::{DeleteResult, Document, InsertResult, Record, RecordId, UpdateResult};
use crate::query::{Collection, FindQuery};

/// Collection-oriented document store.
///
/// Every method is a single store operation, atomic on the store side.
/// Methods return boxed futures so the store can live behind `Arc<dyn DocumentStore>`.
pub trait DocumentStore: Send + Sync {
    /// Records in `collection` matching the query's filter, ordered and
    /// truncated as it asks. No match is an empty vector.
    fn find(
        &self,
        collection: Collection,
        query: FindQuery,
    ) -> BoxFuture<'_, Result<Vec<Record>, AppError>>;

    /// Look up one record by identifier. `None` when it does not exist.
    fn find_one(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> BoxFuture<'_, Result<Option<Record>, AppError>>;

    /// Insert a document. The store assigns the identifier.
    fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> BoxFuture<'_, Result<InsertResult, AppError>>;

    /// Overwrite the top-level keys in `set` on the matching record, leaving
    /// every other key untouched.
    fn update_one(
        &self,
        collection: Collection,
        id: RecordId,
        set: Document,
    ) -> BoxFuture<'_, Result<UpdateResult, AppError>>;

    /// Remove the record with `id`. Deleting a missing record reports a
    /// `deleted_count` of zero rather than failing.
    fn delete_one(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> BoxFuture<'_, Result<DeleteResult, AppError>>;

    /// Check store connectivity.
    fn ping(&self) -> BoxFuture<'_, Result<(), AppError>>;
}

/// Signs identity claims into bearer credentials and verifies them.
pub trait IdentityVerifier: Send + Sync {
    /// Sign `claims` into a bearer credential.
    fn issue(&self, claims: Claims) -> Result<String, AppError>;

    /// Decode and validate a credential. Fails with [`AppError::InvalidToken`].
    fn verify(&self, token: &str) -> Result<Claims, AppError>;
}
