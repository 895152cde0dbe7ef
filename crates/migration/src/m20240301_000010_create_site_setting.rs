//! Create `site_setting` table: free-form key/value pairs for the public site.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteSetting::Table)
                    .if_not_exists()
                    .col(string_len(SiteSetting::Key, 64).primary_key())
                    .col(text(SiteSetting::Value).not_null())
                    .col(timestamp_with_time_zone(SiteSetting::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SiteSetting::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SiteSetting {
    Table,
    Key,
    Value,
    UpdatedAt,
}
