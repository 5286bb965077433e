//! Append-only store of moisture readings.
//!
//! `ReadingStore` is the only way the rest of the workspace touches the
//! `readings` table. It is a cheap, cloneable handle: the ingestor and the HTTP
//! layer each hold a clone of the same store.

use crate::models::reading::{ActiveModel, Column, Entity, Model};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Failure of the underlying persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

#[derive(Clone)]
pub struct ReadingStore {
    db: DatabaseConnection,
    // Serializes writers; readers never take it.
    write_lock: Arc<Mutex<()>>,
}

impl ReadingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Persists a new reading and returns the stored row.
    ///
    /// When `timestamp` is `None` the current time is used. The row is written
    /// in a single statement, so concurrent readers see either nothing or the
    /// complete row.
    pub async fn insert(
        &self,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Model, StoreError> {
        let _guard = self.write_lock.lock().await;

        let reading = ActiveModel {
            id: NotSet,
            value: Set(value),
            timestamp: Set(timestamp.unwrap_or_else(Utc::now)),
        };

        let model = reading.insert(&self.db).await?;
        tracing::debug!(id = model.id, value = model.value, "reading stored");
        Ok(model)
    }

    /// The most recent reading (max timestamp, ties broken by max id).
    pub async fn latest(&self) -> Result<Option<Model>, StoreError> {
        let reading = Entity::find()
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await?;
        Ok(reading)
    }

    /// Up to `limit` readings, newest first (timestamp desc, then id desc).
    pub async fn recent(&self, limit: u64) -> Result<Vec<Model>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let readings = Entity::find()
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(readings)
    }

    /// Number of stored readings.
    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(Entity::find().count(&self.db).await?)
    }
}
