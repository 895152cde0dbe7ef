//! Create `project` table.
//! Case studies, optionally linked to a category and a client.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(uuid(Project::Id).primary_key())
                    .col(string_len(Project::Title, 256).not_null())
                    .col(string_len(Project::Slug, 256).not_null().unique_key())
                    .col(text_null(Project::Summary))
                    .col(text_null(Project::Body))
                    .col(string_len_null(Project::CoverImageUrl, 512))
                    .col(uuid_null(Project::CategoryId))
                    .col(uuid_null(Project::ClientId))
                    .col(integer_null(Project::Year))
                    .col(boolean(Project::IsFeatured).not_null().default(false))
                    .col(boolean(Project::IsPublished).not_null().default(false))
                    .col(integer(Project::Order).not_null())
                    .col(timestamp_with_time_zone(Project::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Project::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_category")
                            .from(Project::Table, Project::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_client")
                            .from(Project::Table, Project::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Project::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
    Title,
    Slug,
    Summary,
    Body,
    CoverImageUrl,
    CategoryId,
    ClientId,
    Year,
    IsFeatured,
    IsPublished,
    Order,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum Client { Table, Id }
