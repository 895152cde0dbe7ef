//! Portfolio projects (case studies).

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::project::{self, Entity as ProjectEntity};
use models::{category, client, validate};

use crate::errors::ServiceError;
use crate::ordered_store;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewProject {
    pub title: String,
    /// Derived from `title` when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
}

/// Partial update. Nullable references use a double option:
/// absent leaves the value, `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub cover_image_url: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_ext::double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "crate::serde_ext::double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub client_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "crate::serde_ext::double_option")]
    #[schema(value_type = Option<i32>)]
    pub year: Option<Option<i32>>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectFilter {
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub category_id: Option<Uuid>,
}

async fn ensure_slug_free(db: &DatabaseConnection, slug: &str, except: Option<Uuid>) -> Result<(), ServiceError> {
    let mut finder = ProjectEntity::find().filter(project::Column::Slug.eq(slug));
    if let Some(id) = except { finder = finder.filter(project::Column::Id.ne(id)); }
    if finder.one(db).await?.is_some() {
        return Err(ServiceError::conflict(format!("project slug '{slug}' already in use")));
    }
    Ok(())
}

async fn ensure_refs(db: &DatabaseConnection, category_id: Option<Uuid>, client_id: Option<Uuid>) -> Result<(), ServiceError> {
    if let Some(id) = category_id {
        if category::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("category"));
        }
    }
    if let Some(id) = client_id {
        if client::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("client"));
        }
    }
    Ok(())
}

pub async fn list_projects(db: &DatabaseConnection, filter: ProjectFilter) -> Result<Vec<project::Model>, ServiceError> {
    let mut finder = ProjectEntity::find();
    if let Some(p) = filter.published { finder = finder.filter(project::Column::IsPublished.eq(p)); }
    if let Some(f) = filter.featured { finder = finder.filter(project::Column::IsFeatured.eq(f)); }
    if let Some(c) = filter.category_id { finder = finder.filter(project::Column::CategoryId.eq(c)); }
    Ok(finder.order_by_asc(project::Column::Order).all(db).await?)
}

pub async fn get_project(db: &DatabaseConnection, id: Uuid) -> Result<Option<project::Model>, ServiceError> {
    Ok(ProjectEntity::find_by_id(id).one(db).await?)
}

pub async fn get_project_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<project::Model>, ServiceError> {
    Ok(ProjectEntity::find().filter(project::Column::Slug.eq(slug)).one(db).await?)
}

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_project(db: &DatabaseConnection, input: NewProject) -> Result<project::Model, ServiceError> {
    let title = validate::required_text("title", &input.title, 256)?;
    let slug = match input.slug.as_deref() {
        Some(s) => validate::slug(s)?,
        None => validate::slugify(&title),
    };
    if slug.is_empty() {
        return Err(ServiceError::Validation("slug cannot be derived from title; provide one".into()));
    }
    let summary = validate::optional_text("summary", input.summary.as_deref(), 1000)?;
    let body = validate::optional_text("body", input.body.as_deref(), 100_000)?;
    let cover_image_url = validate::optional_url("cover_image_url", input.cover_image_url.as_deref())?;
    let year = input.year.map(project::validate_year).transpose()?;
    ensure_refs(db, input.category_id, input.client_id).await?;
    ensure_slug_free(db, &slug, None).await?;

    let now = Utc::now();
    let created = ordered_store::append::<ProjectEntity, _, _>(db, Condition::all(), |order| project::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        slug: Set(slug),
        summary: Set(summary),
        body: Set(body),
        cover_image_url: Set(cover_image_url),
        category_id: Set(input.category_id),
        client_id: Set(input.client_id),
        year: Set(year),
        is_featured: Set(input.is_featured),
        is_published: Set(input.is_published),
        order: Set(order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    })
    .await?;
    info!(id = %created.id, slug = %created.slug, order = created.order, "project_created");
    Ok(created)
}

#[instrument(skip(db, patch))]
pub async fn update_project(db: &DatabaseConnection, id: Uuid, patch: ProjectPatch) -> Result<project::Model, ServiceError> {
    let Some(existing) = ProjectEntity::find_by_id(id).one(db).await? else {
        return Err(ServiceError::not_found("project"));
    };
    ensure_refs(db, patch.category_id.flatten(), patch.client_id.flatten()).await?;

    let mut am: project::ActiveModel = existing.into();
    if let Some(t) = patch.title.as_deref() { am.title = Set(validate::required_text("title", t, 256)?); }
    if let Some(s) = patch.slug.as_deref() {
        let slug = validate::slug(s)?;
        ensure_slug_free(db, &slug, Some(id)).await?;
        am.slug = Set(slug);
    }
    if let Some(s) = patch.summary.as_deref() { am.summary = Set(validate::optional_text("summary", Some(s), 1000)?); }
    if let Some(b) = patch.body.as_deref() { am.body = Set(validate::optional_text("body", Some(b), 100_000)?); }
    if let Some(u) = patch.cover_image_url.as_deref() { am.cover_image_url = Set(validate::optional_url("cover_image_url", Some(u))?); }
    if let Some(c) = patch.category_id { am.category_id = Set(c); }
    if let Some(c) = patch.client_id { am.client_id = Set(c); }
    if let Some(y) = patch.year { am.year = Set(y.map(project::validate_year).transpose()?); }
    if let Some(f) = patch.is_featured { am.is_featured = Set(f); }
    if let Some(p) = patch.is_published { am.is_published = Set(p); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id = %updated.id, "project_updated");
    Ok(updated)
}

pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = ProjectEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "project_deleted"); }
    Ok(res.rows_affected > 0)
}

pub async fn reorder_projects(db: &DatabaseConnection, ids: &[Uuid]) -> Result<usize, ServiceError> {
    ordered_store::reorder::<ProjectEntity>(db, Condition::all(), ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{create_category, NewCategory};
    use crate::test_support::get_db;

    fn new(title: &str) -> NewProject {
        NewProject {
            title: title.into(),
            slug: None,
            summary: None,
            body: None,
            cover_image_url: None,
            category_id: None,
            client_id: None,
            year: Some(2024),
            is_featured: false,
            is_published: true,
        }
    }

    #[tokio::test]
    async fn project_crud_and_slug_lookup() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = create_category(&db, NewCategory { name: "Web".into(), slug: None, description: None }).await?;

        let p = create_project(&db, NewProject { category_id: Some(cat.id), ..new("Coffee Shop Rebrand") }).await?;
        assert_eq!(p.slug, "coffee-shop-rebrand");
        assert_eq!(p.order, 1);

        let by_slug = get_project_by_slug(&db, "coffee-shop-rebrand").await?.expect("by slug");
        assert_eq!(by_slug.id, p.id);

        let in_cat = list_projects(&db, ProjectFilter { category_id: Some(cat.id), ..Default::default() }).await?;
        assert_eq!(in_cat.len(), 1);

        let patch: ProjectPatch = serde_json::from_str(r#"{"category_id": null, "is_featured": true}"#)?;
        let updated = update_project(&db, p.id, patch).await?;
        assert_eq!(updated.category_id, None);
        assert!(updated.is_featured);
        assert_eq!(updated.year, Some(2024));

        assert!(delete_project(&db, p.id).await?);
        assert!(get_project(&db, p.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_references_are_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = create_project(&db, NewProject { client_id: Some(Uuid::new_v4()), ..new("Orphan") }).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn published_and_featured_filters() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_project(&db, NewProject { is_featured: true, ..new("One") }).await?;
        create_project(&db, NewProject { is_published: false, ..new("Two") }).await?;
        create_project(&db, new("Three")).await?;

        let published = list_projects(&db, ProjectFilter { published: Some(true), ..Default::default() }).await?;
        let titles: Vec<_> = published.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["One", "Three"]);

        let featured = list_projects(&db, ProjectFilter { featured: Some(true), ..Default::default() }).await?;
        assert_eq!(featured.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn slug_clash_is_conflict_and_year_is_bounded() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_project(&db, new("Atlas")).await?;
        assert!(matches!(create_project(&db, new("Atlas")).await, Err(ServiceError::Conflict(_))));
        let bad_year = create_project(&db, NewProject { year: Some(1200), ..new("Ancient") }).await;
        assert!(matches!(bad_year, Err(ServiceError::Model(_))));
        Ok(())
    }
}
