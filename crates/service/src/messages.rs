//! Contact form inbox.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::message::{self, Entity as MessageEntity};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Public submission payload.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MessagePatch {
    pub is_read: bool,
}

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn submit_message(db: &DatabaseConnection, input: NewMessage) -> Result<message::Model, ServiceError> {
    let created = message::create(db, &input.name, &input.email, input.subject.as_deref(), &input.body).await?;
    info!(id = %created.id, "message_received");
    Ok(created)
}

/// Newest first.
pub async fn list_messages(db: &DatabaseConnection, pagination: Pagination, unread_only: bool) -> Result<Page<message::Model>, ServiceError> {
    let (page, per_page) = pagination.normalize();
    let mut finder = MessageEntity::find();
    if unread_only { finder = finder.filter(message::Column::IsRead.eq(false)); }
    let paginator = finder
        .order_by_desc(message::Column::CreatedAt)
        .order_by_asc(message::Column::Id)
        .paginate(db, per_page);
    let counts = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page).await?;
    Ok(Page {
        items,
        page: page + 1,
        per_page,
        total_items: counts.number_of_items,
        total_pages: counts.number_of_pages,
    })
}

pub async fn get_message(db: &DatabaseConnection, id: Uuid) -> Result<Option<message::Model>, ServiceError> {
    Ok(MessageEntity::find_by_id(id).one(db).await?)
}

pub async fn set_message_read(db: &DatabaseConnection, id: Uuid, is_read: bool) -> Result<message::Model, ServiceError> {
    let Some(existing) = MessageEntity::find_by_id(id).one(db).await? else {
        return Err(ServiceError::not_found("message"));
    };
    let mut am: message::ActiveModel = existing.into();
    am.is_read = Set(is_read);
    Ok(am.update(db).await?)
}

pub async fn delete_message(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = MessageEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(%id, "message_deleted"); }
    Ok(res.rows_affected > 0)
}
