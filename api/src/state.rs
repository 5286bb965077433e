//! Application state shared across Axum route handlers.
//!
//! Everything in here is a handle constructed once in `main` and cloned into
//! each handler through Axum's `State<T>` extractor; there are no globals.

use db::ReadingStore;
use ingestor::IngestorStatus;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    store: ReadingStore,
    ingestor: Arc<IngestorStatus>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `store` - The reading store, shared with the ingestor.
    /// * `ingestor` - Live status of the ingestor, reported by `/api/health`.
    pub fn new(store: ReadingStore, ingestor: Arc<IngestorStatus>) -> Self {
        Self { store, ingestor }
    }

    pub fn store(&self) -> &ReadingStore {
        &self.store
    }

    pub fn ingestor(&self) -> &IngestorStatus {
        &self.ingestor
    }
}
