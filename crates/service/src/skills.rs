//! Skills, ordered independently within each [`SkillCategory`].

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::skill::{self, Entity as SkillEntity, SkillCategory};
use models::validate;

use crate::errors::ServiceError;
use crate::ordered_store;
use crate::ordering::next_position;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewSkill {
    pub name: String,
    #[schema(value_type = String, example = "design")]
    pub category: SkillCategory,
    /// Proficiency, 0..=100.
    #[serde(default)]
    pub level: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SkillPatch {
    pub name: Option<String>,
    /// Moving a skill appends it to the end of the new category.
    #[schema(value_type = Option<String>)]
    pub category: Option<SkillCategory>,
    #[serde(default, deserialize_with = "crate::serde_ext::double_option")]
    #[schema(value_type = Option<i32>)]
    pub level: Option<Option<i32>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SkillFilter {
    #[param(value_type = Option<String>)]
    pub category: Option<SkillCategory>,
}

/// Ordering partition of one category.
pub fn partition(category: SkillCategory) -> Condition {
    Condition::all().add(skill::Column::Category.eq(category))
}

/// Skills grouped by category, each group in its own display order.
pub async fn list_skills(db: &DatabaseConnection, filter: SkillFilter) -> Result<Vec<skill::Model>, ServiceError> {
    let mut finder = SkillEntity::find();
    if let Some(c) = filter.category { finder = finder.filter(skill::Column::Category.eq(c)); }
    let rows = finder
        .order_by_asc(skill::Column::Category)
        .order_by_asc(skill::Column::Order)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_skill(db: &DatabaseConnection, id: Uuid) -> Result<Option<skill::Model>, ServiceError> {
    Ok(SkillEntity::find_by_id(id).one(db).await?)
}

#[instrument(skip(db, input), fields(name = %input.name, category = ?input.category))]
pub async fn create_skill(db: &DatabaseConnection, input: NewSkill) -> Result<skill::Model, ServiceError> {
    let name = validate::required_text("name", &input.name, 128)?;
    let level = input.level.map(skill::validate_level).transpose()?;

    let now = Utc::now();
    let created = ordered_store::append::<SkillEntity, _, _>(db, partition(input.category), |order| skill::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        category: Set(input.category),
        level: Set(level),
        order: Set(order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    })
    .await?;
    info!(id = %created.id, order = created.order, "skill_created");
    Ok(created)
}

#[instrument(skip(db, patch))]
pub async fn update_skill(db: &DatabaseConnection, id: Uuid, patch: SkillPatch) -> Result<skill::Model, ServiceError> {
    let txn = db.begin().await?;
    let Some(existing) = SkillEntity::find_by_id(id).one(&txn).await? else {
        return Err(ServiceError::not_found("skill"));
    };
    let previous_category = existing.category;
    let mut am: skill::ActiveModel = existing.into();
    if let Some(n) = patch.name.as_deref() { am.name = Set(validate::required_text("name", n, 128)?); }
    if let Some(l) = patch.level { am.level = Set(l.map(skill::validate_level).transpose()?); }
    if let Some(c) = patch.category.filter(|c| *c != previous_category) {
        let max = ordered_store::max_order::<SkillEntity, _>(&txn, partition(c)).await?;
        am.category = Set(c);
        am.order = Set(next_position(max));
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %updated.id, category = ?updated.category, order = updated.order, "skill_updated");
    Ok(updated)
}

pub async fn delete_skill(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = SkillEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "skill_deleted"); }
    Ok(res.rows_affected > 0)
}

/// Reorder within the single category the listed skills belong to.
///
/// Unknown ids are Not Found; ids spanning categories are a validation error.
/// The category lookup and the rewrite share one transaction.
pub async fn reorder_skills(db: &DatabaseConnection, ids: &[Uuid]) -> Result<usize, ServiceError> {
    if ids.is_empty() {
        return Err(ServiceError::Validation("reorder list is empty".into()));
    }
    let txn = db.begin().await?;
    let categories: Vec<SkillCategory> = SkillEntity::find()
        .select_only()
        .column(skill::Column::Category)
        .filter(skill::Column::Id.is_in(ids.iter().copied()))
        .into_tuple()
        .all(&txn)
        .await?;
    let distinct: HashSet<SkillCategory> = categories.iter().copied().collect();
    let category = match distinct.len() {
        0 => return Err(ServiceError::not_found("skill")),
        1 => categories[0],
        _ => return Err(ServiceError::Validation("reorder list mixes skill categories".into())),
    };
    // ids outside the category surface as Not Found from the planner
    let rewritten = ordered_store::reorder_within::<SkillEntity, _>(&txn, partition(category), ids).await?;
    txn.commit().await?;
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new(name: &str, category: SkillCategory) -> NewSkill {
        NewSkill { name: name.into(), category, level: Some(70) }
    }

    fn orders(rows: &[skill::Model]) -> Vec<(&str, i32)> {
        rows.iter().map(|s| (s.name.as_str(), s.order)).collect()
    }

    #[tokio::test]
    async fn each_category_numbers_from_one() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let figma = create_skill(&db, new("Figma", SkillCategory::Tools)).await?;
        let rust = create_skill(&db, new("Rust", SkillCategory::Development)).await?;
        let sketch = create_skill(&db, new("Sketch", SkillCategory::Tools)).await?;
        assert_eq!((figma.order, rust.order, sketch.order), (1, 1, 2));
        Ok(())
    }

    #[tokio::test]
    async fn reorder_stays_inside_the_partition() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let figma = create_skill(&db, new("Figma", SkillCategory::Tools)).await?;
        let sketch = create_skill(&db, new("Sketch", SkillCategory::Tools)).await?;
        let blender = create_skill(&db, new("Blender", SkillCategory::Tools)).await?;
        create_skill(&db, new("Rust", SkillCategory::Development)).await?;
        create_skill(&db, new("Go", SkillCategory::Development)).await?;

        reorder_skills(&db, &[blender.id, figma.id, sketch.id]).await?;

        let tools = list_skills(&db, SkillFilter { category: Some(SkillCategory::Tools) }).await?;
        assert_eq!(orders(&tools), [("Blender", 1), ("Figma", 2), ("Sketch", 3)]);
        let dev = list_skills(&db, SkillFilter { category: Some(SkillCategory::Development) }).await?;
        assert_eq!(orders(&dev), [("Rust", 1), ("Go", 2)]);
        Ok(())
    }

    #[tokio::test]
    async fn mixed_categories_are_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let figma = create_skill(&db, new("Figma", SkillCategory::Tools)).await?;
        let rust = create_skill(&db, new("Rust", SkillCategory::Development)).await?;
        let res = reorder_skills(&db, &[figma.id, rust.id]).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(get_skill(&db, rust.id).await?.map(|s| s.order), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_only_list_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let figma = create_skill(&db, new("Figma", SkillCategory::Tools)).await?;
        assert!(matches!(reorder_skills(&db, &[Uuid::new_v4()]).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(reorder_skills(&db, &[figma.id, Uuid::new_v4()]).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(reorder_skills(&db, &[]).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn reorder_uses_the_current_category_of_a_moved_skill() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let rust = create_skill(&db, new("Rust", SkillCategory::Development)).await?;
        let figma = create_skill(&db, new("Figma", SkillCategory::Tools)).await?;
        update_skill(&db, figma.id, SkillPatch { category: Some(SkillCategory::Development), ..Default::default() }).await?;

        assert_eq!(reorder_skills(&db, &[figma.id, rust.id]).await?, 2);
        let dev = list_skills(&db, SkillFilter { category: Some(SkillCategory::Development) }).await?;
        assert_eq!(orders(&dev), [("Figma", 1), ("Rust", 2)]);
        Ok(())
    }

    #[tokio::test]
    async fn moving_category_appends_to_new_partition() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_skill(&db, new("Rust", SkillCategory::Development)).await?;
        create_skill(&db, new("Go", SkillCategory::Development)).await?;
        let figma = create_skill(&db, new("Figma", SkillCategory::Tools)).await?;

        let moved = update_skill(&db, figma.id, SkillPatch { category: Some(SkillCategory::Development), ..Default::default() }).await?;
        assert_eq!(moved.category, SkillCategory::Development);
        assert_eq!(moved.order, 3);

        let same = update_skill(&db, figma.id, SkillPatch { category: Some(SkillCategory::Development), level: Some(None), ..Default::default() }).await?;
        assert_eq!(same.order, 3);
        assert_eq!(same.level, None);
        Ok(())
    }
}
