use std::sync::Arc;

use serde_json::Value;

use crate::error::AppError;
use crate::models::{
    DeleteResult, Document, InsertResult, Record, RecordId, ReviewUpdate, UpdateResult, without_id,
};
use crate::query::{Collection, FindQuery, SortDirection};
use crate::traits::DocumentStore;

/// Field every listing is ordered by.
pub const SORT_FIELD: &str = "date";

/// Number of services shown on the home page.
pub const HOME_LIMIT: usize = 3;

/// The service and review operations exposed over HTTP.
///
/// Each method issues exactly one store call. Listings are sorted by `date`,
/// newest first; records without a `date` come last.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn DocumentStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn newest_first() -> FindQuery {
        FindQuery::all().sort_by(SORT_FIELD, SortDirection::Descending)
    }

    // -- Services --

    pub async fn list_services(&self) -> Result<Vec<Record>, AppError> {
        self.store
            .find(Collection::Services, Self::newest_first())
            .await
    }

    pub async fn list_home_services(&self) -> Result<Vec<Record>, AppError> {
        self.store
            .find(Collection::Services, Self::newest_first().limit(HOME_LIMIT))
            .await
    }

    pub async fn get_service(&self, id: RecordId) -> Result<Option<Record>, AppError> {
        self.store.find_one(Collection::Services, id).await
    }

    pub async fn create_service(&self, document: Document) -> Result<InsertResult, AppError> {
        self.store
            .insert_one(Collection::Services, without_id(document))
            .await
    }

    // -- Reviews --

    pub async fn create_review(&self, document: Document) -> Result<InsertResult, AppError> {
        self.store
            .insert_one(Collection::Reviews, without_id(document))
            .await
    }

    pub async fn list_reviews(&self) -> Result<Vec<Record>, AppError> {
        self.store
            .find(Collection::Reviews, Self::newest_first())
            .await
    }

    pub async fn get_review(&self, id: RecordId) -> Result<Option<Record>, AppError> {
        self.store.find_one(Collection::Reviews, id).await
    }

    /// Overwrite `date`, `ratings` and `details`. `serviceId` and `email` never change.
    pub async fn update_review(
        &self,
        id: RecordId,
        update: ReviewUpdate,
    ) -> Result<UpdateResult, AppError> {
        self.store
            .update_one(Collection::Reviews, id, update.into_document())
            .await
    }

    /// Reviews whose `serviceId` is exactly the given string.
    pub async fn list_reviews_by_service(&self, service_id: &str) -> Result<Vec<Record>, AppError> {
        let query = Self::newest_first().where_eq("serviceId", Value::from(service_id));
        self.store.find(Collection::Reviews, query).await
    }

    /// Reviews written by `email`. Callers must run the ownership check first.
    pub async fn list_reviews_by_owner(&self, email: &str) -> Result<Vec<Record>, AppError> {
        let query = Self::newest_first().where_eq("email", Value::from(email));
        self.store.find(Collection::Reviews, query).await
    }

    pub async fn delete_review(&self, id: RecordId) -> Result<DeleteResult, AppError> {
        self.store.delete_one(Collection::Reviews, id).await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
