use crate::store::ReadingStore;
use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub async fn setup_test_db() -> DatabaseConnection {
    // Every pooled connection to `:memory:` would be its own database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// A `ReadingStore` over a fresh, migrated in-memory database.
pub async fn setup_test_store() -> ReadingStore {
    ReadingStore::new(setup_test_db().await)
}
