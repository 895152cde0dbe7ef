//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_user;
mod m20240301_000002_create_category;
mod m20240301_000003_create_client;
mod m20240301_000004_create_hero_slide;
mod m20240301_000005_create_project;
mod m20240301_000006_create_service;
mod m20240301_000007_create_skill;
mod m20240301_000008_create_experience;
mod m20240301_000009_create_message;
mod m20240301_000010_create_site_setting;
mod m20240301_000020_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_user::Migration),
            Box::new(m20240301_000002_create_category::Migration),
            Box::new(m20240301_000003_create_client::Migration),
            Box::new(m20240301_000004_create_hero_slide::Migration),
            // project references category and client
            Box::new(m20240301_000005_create_project::Migration),
            Box::new(m20240301_000006_create_service::Migration),
            Box::new(m20240301_000007_create_skill::Migration),
            Box::new(m20240301_000008_create_experience::Migration),
            Box::new(m20240301_000009_create_message::Migration),
            Box::new(m20240301_000010_create_site_setting::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000020_add_indexes::Migration),
        ]
    }
}
