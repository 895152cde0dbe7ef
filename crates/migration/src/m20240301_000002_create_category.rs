//! Create `category` table (project categories, orderable).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(uuid(Category::Id).primary_key())
                    .col(string_len(Category::Name, 128).not_null())
                    .col(string_len(Category::Slug, 128).not_null().unique_key())
                    .col(text_null(Category::Description))
                    .col(integer(Category::Order).not_null())
                    .col(timestamp_with_time_zone(Category::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Category::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Order,
    CreatedAt,
    UpdatedAt,
}
