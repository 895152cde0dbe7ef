use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use common::types::Ack;
use models::client;
use service::clients::{self as svc, ClientPatch, NewClient, ClientFilter};
use service::ordering::ReorderInput;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

#[utoipa::path(get, path = "/api/clients", tag = "clients", params(ClientFilter), responses((status = 200, description = "Clients in display order")))]
pub async fn list(State(state): State<ServerState>, ApiQuery(filter): ApiQuery<ClientFilter>) -> Result<Json<Vec<client::Model>>, JsonApiError> {
    Ok(Json(svc::list_clients(&state.db, filter).await?))
}

#[utoipa::path(get, path = "/api/clients/{id}", tag = "clients", params(("id" = Uuid, Path, description = "Client id")), responses((status = 200, description = "Category"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<client::Model>, JsonApiError> {
    svc::get_client(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("client not found"))
}

#[utoipa::path(post, path = "/api/clients", tag = "clients", security(("bearer" = [])), request_body = NewClient, responses((status = 201, description = "Created, appended last"), (status = 400, description = "Invalid input")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewClient>) -> Result<(StatusCode, Json<client::Model>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(svc::create_client(&state.db, input).await?)))
}

#[utoipa::path(put, path = "/api/clients/{id}", tag = "clients", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Client id")), request_body = ClientPatch, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<ClientPatch>) -> Result<Json<client::Model>, JsonApiError> {
    Ok(Json(svc::update_client(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/clients/{id}", tag = "clients", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Client id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_client(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("client not found")) }
}

#[utoipa::path(post, path = "/api/clients/reorder", tag = "clients", security(("bearer" = [])), request_body = ReorderInput, responses((status = 200, description = "Positions rewritten"), (status = 400, description = "Empty or duplicate ids"), (status = 404, description = "Unknown id")))]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<Json<Ack>, JsonApiError> {
    svc::reorder_clients(&state.db, &input.ids()).await?;
    Ok(Json(Ack::ok()))
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/api/clients", get(list))
        .route("/api/clients/:id", get(get_one));
    let admin = Router::new()
        .route("/api/clients", post(create))
        .route("/api/clients/reorder", post(reorder))
        .route("/api/clients/:id", put(update).delete(remove));
    public.merge(super::admin_only(state, admin))
}
