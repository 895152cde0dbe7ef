use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Skill: listing and max(order) are always scoped by category
        manager
            .create_index(
                Index::create()
                    .name("idx_skill_category_order")
                    .table(Skill::Table)
                    .col(Skill::Category)
                    .col(Skill::Order)
                    .to_owned(),
            )
            .await?;

        // Project: public listing filters on published, ordered by order
        manager
            .create_index(
                Index::create()
                    .name("idx_project_published_order")
                    .table(Project::Table)
                    .col(Project::IsPublished)
                    .col(Project::Order)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_category")
                    .table(Project::Table)
                    .col(Project::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Message: inbox is newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_message_created_at")
                    .table(Message::Table)
                    .col(Message::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_message_created_at").table(Message::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_category").table(Project::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_published_order").table(Project::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_skill_category_order").table(Skill::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Skill { Table, Category, Order }

#[derive(DeriveIden)]
enum Project { Table, IsPublished, Order, CategoryId }

#[derive(DeriveIden)]
enum Message { Table, CreatedAt }
