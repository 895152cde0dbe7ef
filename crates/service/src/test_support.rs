#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

/// Fresh, fully migrated in-memory database private to the calling test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
