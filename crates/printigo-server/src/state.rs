use std::sync::Arc;

use printigo_core::{Catalog, DocumentStore, IdentityVerifier};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub catalog: Catalog,
    /// Issues and verifies bearer credentials for `/jwt` and `/my-reviews`.
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            catalog: Catalog::new(store),
            verifier,
        }
    }
}
