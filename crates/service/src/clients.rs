//! Clients shown on the logo wall.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::client::{self, Entity as ClientEntity};
use models::validate;

use crate::errors::ServiceError;
use crate::ordered_store;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewClient {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ClientPatch {
    pub name: Option<String>,
    /// Empty string clears the value.
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientFilter {
    /// Only clients with the given visibility.
    pub visible: Option<bool>,
}

pub async fn list_clients(db: &DatabaseConnection, filter: ClientFilter) -> Result<Vec<client::Model>, ServiceError> {
    let mut finder = ClientEntity::find();
    if let Some(v) = filter.visible { finder = finder.filter(client::Column::IsVisible.eq(v)); }
    Ok(finder.order_by_asc(client::Column::Order).all(db).await?)
}

pub async fn get_client(db: &DatabaseConnection, id: Uuid) -> Result<Option<client::Model>, ServiceError> {
    Ok(ClientEntity::find_by_id(id).one(db).await?)
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_client(db: &DatabaseConnection, input: NewClient) -> Result<client::Model, ServiceError> {
    let name = validate::required_text("name", &input.name, 128)?;
    let logo_url = validate::optional_url("logo_url", input.logo_url.as_deref())?;
    let website_url = validate::optional_url("website_url", input.website_url.as_deref())?;

    let now = Utc::now();
    let created = ordered_store::append::<ClientEntity, _, _>(db, Condition::all(), |order| client::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        logo_url: Set(logo_url),
        website_url: Set(website_url),
        is_visible: Set(input.is_visible),
        order: Set(order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    })
    .await?;
    info!(id = %created.id, order = created.order, "client_created");
    Ok(created)
}

#[instrument(skip(db, patch))]
pub async fn update_client(db: &DatabaseConnection, id: Uuid, patch: ClientPatch) -> Result<client::Model, ServiceError> {
    let Some(existing) = ClientEntity::find_by_id(id).one(db).await? else {
        return Err(ServiceError::not_found("client"));
    };
    let mut am: client::ActiveModel = existing.into();
    if let Some(name) = patch.name.as_deref() { am.name = Set(validate::required_text("name", name, 128)?); }
    if let Some(u) = patch.logo_url.as_deref() { am.logo_url = Set(validate::optional_url("logo_url", Some(u))?); }
    if let Some(u) = patch.website_url.as_deref() { am.website_url = Set(validate::optional_url("website_url", Some(u))?); }
    if let Some(v) = patch.is_visible { am.is_visible = Set(v); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id = %updated.id, "client_updated");
    Ok(updated)
}

pub async fn delete_client(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = ClientEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "client_deleted"); }
    Ok(res.rows_affected > 0)
}

pub async fn reorder_clients(db: &DatabaseConnection, ids: &[Uuid]) -> Result<usize, ServiceError> {
    ordered_store::reorder::<ClientEntity>(db, Condition::all(), ids).await
}
