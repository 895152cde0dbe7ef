use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::setup_test_db;
use crate::{category, message, project, skill, user};
use crate::skill::SkillCategory;

fn category_am(name: &str, slug: &str, order: i32) -> category::ActiveModel {
    let now = Utc::now().into();
    category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        slug: Set(slug.into()),
        description: Set(None),
        order: Set(order),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn project_am(slug: &str, category_id: Option<Uuid>, order: i32) -> project::ActiveModel {
    let now = Utc::now().into();
    project::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(format!("Project {slug}")),
        slug: Set(slug.into()),
        summary: Set(None),
        body: Set(None),
        cover_image_url: Set(None),
        category_id: Set(category_id),
        client_id: Set(None),
        year: Set(Some(2024)),
        is_featured: Set(false),
        is_published: Set(true),
        order: Set(order),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[tokio::test]
async fn user_create_and_lookup_by_email() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, "Admin@Example.com", "Admin", "hash".into(), user::ROLE_ADMIN).await?;
    assert_eq!(u.email, "admin@example.com");
    assert!(u.is_admin());

    let found = user::find_by_email(&db, " ADMIN@example.com ").await?.expect("user by email");
    assert_eq!(found.id, u.id);

    let bad_role = user::create(&db, "e@example.com", "E", "hash".into(), "root").await;
    assert!(bad_role.is_err());
    Ok(())
}

#[tokio::test]
async fn duplicate_user_email_is_rejected_by_schema() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, "a@example.com", "A", "h".into(), user::ROLE_EDITOR).await?;
    let dup = user::create(&db, "a@example.com", "B", "h".into(), user::ROLE_EDITOR).await;
    assert!(dup.is_err());
    Ok(())
}

#[tokio::test]
async fn project_category_relation_and_set_null_on_delete() -> Result<()> {
    let db = setup_test_db().await?;
    let cat = category_am("Branding", "branding", 1).insert(&db).await?;
    let p = project_am("logo-refresh", Some(cat.id), 1).insert(&db).await?;

    let projects = cat.find_related(project::Entity).all(&db).await?;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, p.id);

    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    let after = project::Entity::find_by_id(p.id).one(&db).await?.expect("project survives");
    assert_eq!(after.category_id, None);
    Ok(())
}

#[tokio::test]
async fn skill_category_round_trips_through_storage() -> Result<()> {
    let db = setup_test_db().await?;
    let now = Utc::now();
    for (name, cat, order) in [("Figma", SkillCategory::Tools, 1), ("Rust", SkillCategory::Development, 1), ("Sketch", SkillCategory::Tools, 2)] {
        skill::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.into()),
            category: Set(cat),
            level: Set(Some(80)),
            order: Set(order),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&db)
        .await?;
    }

    let tools = skill::Entity::find()
        .filter(skill::Column::Category.eq(SkillCategory::Tools))
        .order_by_asc(skill::Column::Order)
        .all(&db)
        .await?;
    let names: Vec<_> = tools.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Figma", "Sketch"]);
    Ok(())
}

#[tokio::test]
async fn message_create_validates_fields() -> Result<()> {
    let db = setup_test_db().await?;
    let m = message::create(&db, "Jane", "jane@example.com", Some("  "), "Hello there").await?;
    assert_eq!(m.subject, None);
    assert!(!m.is_read);

    assert!(message::create(&db, "Jane", "not-an-email", None, "Hi").await.is_err());
    assert!(message::create(&db, "Jane", "jane@example.com", None, "  ").await.is_err());
    Ok(())
}

#[test]
fn experience_period_validation() {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let before = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
    assert!(crate::experience::validate_period(start, None).is_ok());
    assert!(crate::experience::validate_period(start, Some(start)).is_ok());
    assert!(crate::experience::validate_period(start, Some(before)).is_err());
}
