//! Project categories.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::category::{self, Entity as CategoryEntity};
use models::validate;

use crate::errors::ServiceError;
use crate::ordered_store;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewCategory {
    pub name: String,
    /// Derived from `name` when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    /// Empty string clears the description.
    pub description: Option<String>,
}

fn resolve_slug(explicit: Option<&str>, name: &str) -> Result<String, ServiceError> {
    match explicit {
        Some(s) => Ok(validate::slug(s)?),
        None => {
            let derived = validate::slugify(name);
            if derived.is_empty() {
                return Err(ServiceError::Validation("slug cannot be derived from name; provide one".into()));
            }
            Ok(derived)
        }
    }
}

async fn ensure_slug_free(db: &DatabaseConnection, slug: &str, except: Option<Uuid>) -> Result<(), ServiceError> {
    let mut finder = CategoryEntity::find().filter(category::Column::Slug.eq(slug));
    if let Some(id) = except { finder = finder.filter(category::Column::Id.ne(id)); }
    if finder.one(db).await?.is_some() {
        return Err(ServiceError::conflict(format!("category slug '{slug}' already in use")));
    }
    Ok(())
}

/// All categories in display order.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    let rows = CategoryEntity::find().order_by_asc(category::Column::Order).all(db).await?;
    Ok(rows)
}

pub async fn get_category(db: &DatabaseConnection, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
    Ok(CategoryEntity::find_by_id(id).one(db).await?)
}

/// Create a category at the end of the list.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_category(db: &DatabaseConnection, input: NewCategory) -> Result<category::Model, ServiceError> {
    let name = validate::required_text("name", &input.name, 128)?;
    let slug = resolve_slug(input.slug.as_deref(), &name)?;
    let description = validate::optional_text("description", input.description.as_deref(), 2000)?;
    ensure_slug_free(db, &slug, None).await?;

    let now = Utc::now();
    let created = ordered_store::append::<CategoryEntity, _, _>(db, Condition::all(), |order| category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug),
        description: Set(description),
        order: Set(order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    })
    .await?;
    info!(id = %created.id, order = created.order, "category_created");
    Ok(created)
}

/// Partial update; position is left alone.
#[instrument(skip(db, patch))]
pub async fn update_category(db: &DatabaseConnection, id: Uuid, patch: CategoryPatch) -> Result<category::Model, ServiceError> {
    let Some(existing) = CategoryEntity::find_by_id(id).one(db).await? else {
        return Err(ServiceError::not_found("category"));
    };
    let mut am: category::ActiveModel = existing.into();
    if let Some(name) = patch.name.as_deref() {
        am.name = Set(validate::required_text("name", name, 128)?);
    }
    if let Some(slug) = patch.slug.as_deref() {
        let slug = validate::slug(slug)?;
        ensure_slug_free(db, &slug, Some(id)).await?;
        am.slug = Set(slug);
    }
    if let Some(d) = patch.description.as_deref() {
        am.description = Set(validate::optional_text("description", Some(d), 2000)?);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id = %updated.id, "category_updated");
    Ok(updated)
}

/// Delete; returns true if a row was removed. Positions are not compacted.
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = CategoryEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "category_deleted"); }
    Ok(res.rows_affected > 0)
}

pub async fn reorder_categories(db: &DatabaseConnection, ids: &[Uuid]) -> Result<usize, ServiceError> {
    ordered_store::reorder::<CategoryEntity>(db, Condition::all(), ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new(name: &str) -> NewCategory {
        NewCategory { name: name.into(), slug: None, description: None }
    }

    #[tokio::test]
    async fn category_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let c = create_category(&db, new("Brand Identity")).await?;
        assert_eq!(c.slug, "brand-identity");
        assert_eq!(c.order, 1);

        let updated = update_category(&db, c.id, CategoryPatch { description: Some("Logos and marks".into()), ..Default::default() }).await?;
        assert_eq!(updated.description.as_deref(), Some("Logos and marks"));
        assert_eq!(updated.order, 1);

        let cleared = update_category(&db, c.id, CategoryPatch { description: Some(String::new()), ..Default::default() }).await?;
        assert_eq!(cleared.description, None);

        assert!(get_category(&db, c.id).await?.is_some());
        assert!(delete_category(&db, c.id).await?);
        assert!(!delete_category(&db, c.id).await?);
        assert!(get_category(&db, c.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = create_category(&db, new("Web")).await?;
        let dup = create_category(&db, new("Web")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let other = create_category(&db, new("Print")).await?;
        let clash = update_category(&db, other.id, CategoryPatch { slug: Some(first.slug.clone()), ..Default::default() }).await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = update_category(&db, Uuid::new_v4(), CategoryPatch::default()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = create_category(&db, new("   ")).await;
        assert!(matches!(res, Err(ServiceError::Model(_))));
        Ok(())
    }
}
