//! Services offered by the studio.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::service::{self, Entity as ServiceEntity};
use models::validate;

use crate::errors::ServiceError;
use crate::ordered_store;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewService {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Icon name or asset URL.
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ServicePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

pub async fn list_services(db: &DatabaseConnection) -> Result<Vec<service::Model>, ServiceError> {
    Ok(ServiceEntity::find().order_by_asc(service::Column::Order).all(db).await?)
}

pub async fn get_service(db: &DatabaseConnection, id: Uuid) -> Result<Option<service::Model>, ServiceError> {
    Ok(ServiceEntity::find_by_id(id).one(db).await?)
}

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_service(db: &DatabaseConnection, input: NewService) -> Result<service::Model, ServiceError> {
    let title = validate::required_text("title", &input.title, 256)?;
    let description = validate::optional_text("description", input.description.as_deref(), 5000)?;
    let icon = validate::optional_text("icon", input.icon.as_deref(), 512)?;

    let now = Utc::now();
    let created = ordered_store::append::<ServiceEntity, _, _>(db, Condition::all(), |order| service::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        description: Set(description),
        icon: Set(icon),
        order: Set(order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    })
    .await?;
    info!(id = %created.id, order = created.order, "service_created");
    Ok(created)
}

#[instrument(skip(db, patch))]
pub async fn update_service(db: &DatabaseConnection, id: Uuid, patch: ServicePatch) -> Result<service::Model, ServiceError> {
    let Some(existing) = ServiceEntity::find_by_id(id).one(db).await? else {
        return Err(ServiceError::not_found("service"));
    };
    let mut am: service::ActiveModel = existing.into();
    if let Some(t) = patch.title.as_deref() { am.title = Set(validate::required_text("title", t, 256)?); }
    if let Some(d) = patch.description.as_deref() { am.description = Set(validate::optional_text("description", Some(d), 5000)?); }
    if let Some(i) = patch.icon.as_deref() { am.icon = Set(validate::optional_text("icon", Some(i), 512)?); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id = %updated.id, "service_updated");
    Ok(updated)
}

pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = ServiceEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "service_deleted"); }
    Ok(res.rows_affected > 0)
}

pub async fn reorder_services(db: &DatabaseConnection, ids: &[Uuid]) -> Result<usize, ServiceError> {
    ordered_store::reorder::<ServiceEntity>(db, Condition::all(), ids).await
}
