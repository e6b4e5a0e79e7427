pub mod catalog;
pub mod error;
pub mod identity;
pub mod models;
pub mod query;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use catalog::Catalog;
pub use error::AppError;
pub use identity::{Claims, authorize_owner};
pub use models::{Document, Record, RecordId, ReviewUpdate};
pub use query::{Collection, FindQuery, SortDirection};
pub use traits::{DocumentStore, IdentityVerifier};
