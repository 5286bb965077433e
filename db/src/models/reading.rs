// db/models/reading.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// One soil moisture measurement.
///
/// Rows are append-only: they are created by the ingestor and never updated or
/// deleted by the application.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "readings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub value: f64, // 0..100, not range checked
    pub timestamp: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
