//! Create `hero_slide` table (landing carousel, orderable).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeroSlide::Table)
                    .if_not_exists()
                    .col(uuid(HeroSlide::Id).primary_key())
                    .col(string_len(HeroSlide::Title, 256).not_null())
                    .col(string_len_null(HeroSlide::Subtitle, 512))
                    .col(string_len(HeroSlide::ImageUrl, 512).not_null())
                    .col(string_len_null(HeroSlide::CtaLabel, 64))
                    .col(string_len_null(HeroSlide::CtaUrl, 512))
                    .col(boolean(HeroSlide::IsActive).not_null().default(true))
                    .col(integer(HeroSlide::Order).not_null())
                    .col(timestamp_with_time_zone(HeroSlide::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(HeroSlide::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(HeroSlide::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum HeroSlide {
    Table,
    Id,
    Title,
    Subtitle,
    ImageUrl,
    CtaLabel,
    CtaUrl,
    IsActive,
    Order,
    CreatedAt,
    UpdatedAt,
}
