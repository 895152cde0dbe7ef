use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use common::types::Ack;
use models::message;
use service::messages::{self as svc, MessagePatch, NewMessage};
use service::pagination::{Page, Pagination};

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

/// Inbox listing query.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessageQuery {
    /// 1-based page index
    pub page: Option<u32>,
    /// Items per page, clamped to 1..=100
    pub per_page: Option<u32>,
    #[serde(default)]
    pub unread_only: bool,
}

impl MessageQuery {
    fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination { page: self.page.unwrap_or(d.page), per_page: self.per_page.unwrap_or(d.per_page) }
    }
}

#[utoipa::path(post, path = "/api/messages", tag = "messages", request_body = NewMessage, responses((status = 201, description = "Message received"), (status = 400, description = "Invalid input")))]
pub async fn submit(State(state): State<ServerState>, ApiJson(input): ApiJson<NewMessage>) -> Result<(StatusCode, Json<Ack>), JsonApiError> {
    svc::submit_message(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(Ack::ok())))
}

#[utoipa::path(get, path = "/api/messages", tag = "messages", security(("bearer" = [])), params(MessageQuery), responses((status = 200, description = "One page of messages, newest first")))]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<MessageQuery>) -> Result<Json<Page<message::Model>>, JsonApiError> {
    Ok(Json(svc::list_messages(&state.db, q.pagination(), q.unread_only).await?))
}

#[utoipa::path(get, path = "/api/messages/{id}", tag = "messages", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Message id")), responses((status = 200, description = "Message"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<message::Model>, JsonApiError> {
    svc::get_message(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("message not found"))
}

#[utoipa::path(patch, path = "/api/messages/{id}", tag = "messages", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Message id")), request_body = MessagePatch, responses((status = 200, description = "Read flag updated"), (status = 404, description = "Not found")))]
pub async fn mark(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<MessagePatch>) -> Result<Json<message::Model>, JsonApiError> {
    Ok(Json(svc::set_message_read(&state.db, id, patch.is_read).await?))
}

#[utoipa::path(delete, path = "/api/messages/{id}", tag = "messages", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Message id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_message(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("message not found")) }
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new().route("/api/messages", post(submit));
    let admin = Router::new()
        .route("/api/messages", get(list))
        .route("/api/messages/:id", get(get_one).patch(mark).delete(remove));
    public.merge(super::admin_only(state, admin))
}
