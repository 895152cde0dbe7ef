/// CRUD operations tests for the entity layer
pub mod crud_tests;

/// Transaction handling tests
pub mod transaction_tests;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, DatabaseConfig};

/// Fresh migrated in-memory database per test.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
