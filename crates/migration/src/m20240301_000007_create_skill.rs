//! Create `skill` table.
//! Ordering is scoped per `category`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skill::Table)
                    .if_not_exists()
                    .col(uuid(Skill::Id).primary_key())
                    .col(string_len(Skill::Name, 128).not_null())
                    .col(string_len(Skill::Category, 32).not_null())
                    .col(integer_null(Skill::Level))
                    .col(integer(Skill::Order).not_null())
                    .col(timestamp_with_time_zone(Skill::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Skill::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Skill::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Skill {
    Table,
    Id,
    Name,
    Category,
    Level,
    Order,
    CreatedAt,
    UpdatedAt,
}
