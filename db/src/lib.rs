pub mod models;
pub mod store;
pub mod test_utils;

pub use store::{ReadingStore, StoreError};

use migration::Migrator;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;

/// Opens the database and brings its schema up to date.
///
/// `path_or_url` is either a full DSN (`sqlite:...`) used as-is, or a file path
/// which is turned into a SQLite DSN that creates the file when missing.
pub async fn connect(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    let url = if path_or_url.starts_with("sqlite:") {
        path_or_url.to_owned()
    } else {
        // Ensure parent directory exists (SQLite won't create intermediate dirs).
        if let Some(parent) = Path::new(path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    let db = Database::connect(&url).await?;
    Migrator::up(&db, None).await?;
    tracing::info!(url = %url, "database ready");

    Ok(db)
}
