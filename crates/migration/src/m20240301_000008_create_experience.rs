//! Create `experience` table (work history, sorted by start date).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Experience::Table)
                    .if_not_exists()
                    .col(uuid(Experience::Id).primary_key())
                    .col(string_len(Experience::Company, 256).not_null())
                    .col(string_len(Experience::Role, 256).not_null())
                    .col(string_len_null(Experience::Location, 256))
                    .col(text_null(Experience::Description))
                    .col(date(Experience::StartDate).not_null())
                    .col(date_null(Experience::EndDate))
                    .col(timestamp_with_time_zone(Experience::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Experience::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Experience::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Experience {
    Table,
    Id,
    Company,
    Role,
    Location,
    Description,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}
