//! Landing page carousel.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::hero_slide::{self, Entity as HeroSlideEntity};
use models::validate;

use crate::errors::ServiceError;
use crate::ordered_store;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewHeroSlide {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct HeroSlidePatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HeroSlideFilter {
    pub active: Option<bool>,
}

/// A call-to-action needs both halves or neither.
fn check_cta(label: &Option<String>, url: &Option<String>) -> Result<(), ServiceError> {
    if label.is_some() != url.is_some() {
        return Err(ServiceError::Validation("cta_label and cta_url must be set together".into()));
    }
    Ok(())
}

pub async fn list_hero_slides(db: &DatabaseConnection, filter: HeroSlideFilter) -> Result<Vec<hero_slide::Model>, ServiceError> {
    let mut finder = HeroSlideEntity::find();
    if let Some(a) = filter.active { finder = finder.filter(hero_slide::Column::IsActive.eq(a)); }
    Ok(finder.order_by_asc(hero_slide::Column::Order).all(db).await?)
}

pub async fn get_hero_slide(db: &DatabaseConnection, id: Uuid) -> Result<Option<hero_slide::Model>, ServiceError> {
    Ok(HeroSlideEntity::find_by_id(id).one(db).await?)
}

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_hero_slide(db: &DatabaseConnection, input: NewHeroSlide) -> Result<hero_slide::Model, ServiceError> {
    let title = validate::required_text("title", &input.title, 256)?;
    let subtitle = validate::optional_text("subtitle", input.subtitle.as_deref(), 512)?;
    let image_url = validate::url("image_url", &input.image_url)?;
    let cta_label = validate::optional_text("cta_label", input.cta_label.as_deref(), 64)?;
    let cta_url = validate::optional_url("cta_url", input.cta_url.as_deref())?;
    check_cta(&cta_label, &cta_url)?;

    let now = Utc::now();
    let created = ordered_store::append::<HeroSlideEntity, _, _>(db, Condition::all(), |order| hero_slide::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        subtitle: Set(subtitle),
        image_url: Set(image_url),
        cta_label: Set(cta_label),
        cta_url: Set(cta_url),
        is_active: Set(input.is_active),
        order: Set(order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    })
    .await?;
    info!(id = %created.id, order = created.order, "hero_slide_created");
    Ok(created)
}

#[instrument(skip(db, patch))]
pub async fn update_hero_slide(db: &DatabaseConnection, id: Uuid, patch: HeroSlidePatch) -> Result<hero_slide::Model, ServiceError> {
    let Some(existing) = HeroSlideEntity::find_by_id(id).one(db).await? else {
        return Err(ServiceError::not_found("hero_slide"));
    };
    let mut cta_label = existing.cta_label.clone();
    let mut cta_url = existing.cta_url.clone();
    let mut am: hero_slide::ActiveModel = existing.into();
    if let Some(t) = patch.title.as_deref() { am.title = Set(validate::required_text("title", t, 256)?); }
    if let Some(s) = patch.subtitle.as_deref() { am.subtitle = Set(validate::optional_text("subtitle", Some(s), 512)?); }
    if let Some(u) = patch.image_url.as_deref() { am.image_url = Set(validate::url("image_url", u)?); }
    if let Some(l) = patch.cta_label.as_deref() { cta_label = validate::optional_text("cta_label", Some(l), 64)?; }
    if let Some(u) = patch.cta_url.as_deref() { cta_url = validate::optional_url("cta_url", Some(u))?; }
    check_cta(&cta_label, &cta_url)?;
    am.cta_label = Set(cta_label);
    am.cta_url = Set(cta_url);
    if let Some(a) = patch.is_active { am.is_active = Set(a); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id = %updated.id, "hero_slide_updated");
    Ok(updated)
}

pub async fn delete_hero_slide(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = HeroSlideEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "hero_slide_deleted"); }
    Ok(res.rows_affected > 0)
}

pub async fn reorder_hero_slides(db: &DatabaseConnection, ids: &[Uuid]) -> Result<usize, ServiceError> {
    ordered_store::reorder::<HeroSlideEntity>(db, Condition::all(), ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new(title: &str) -> NewHeroSlide {
        NewHeroSlide {
            title: title.into(),
            subtitle: None,
            image_url: "https://cdn.example.com/hero.jpg".into(),
            cta_label: None,
            cta_url: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn cta_halves_must_match() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let half = NewHeroSlide { cta_label: Some("See work".into()), ..new("Hello") };
        assert!(matches!(create_hero_slide(&db, half).await, Err(ServiceError::Validation(_))));

        let s = create_hero_slide(&db, NewHeroSlide { cta_label: Some("See work".into()), cta_url: Some("/projects".into()), ..new("Hello") }).await?;
        let res = update_hero_slide(&db, s.id, HeroSlidePatch { cta_url: Some(String::new()), ..Default::default() }).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));

        let cleared = update_hero_slide(&db, s.id, HeroSlidePatch { cta_url: Some(String::new()), cta_label: Some(String::new()), ..Default::default() }).await?;
        assert_eq!((cleared.cta_label, cleared.cta_url), (None, None));
        Ok(())
    }

    #[tokio::test]
    async fn active_filter() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_hero_slide(&db, new("One")).await?;
        create_hero_slide(&db, NewHeroSlide { is_active: false, ..new("Two") }).await?;
        let active = list_hero_slides(&db, HeroSlideFilter { active: Some(true) }).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "One");
        Ok(())
    }
}
