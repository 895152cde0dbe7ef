use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use common::types::Ack;
use models::service as service_model;
use service::services::{self as svc, ServicePatch, NewService};
use service::ordering::ReorderInput;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};

#[utoipa::path(get, path = "/api/services", tag = "services", responses((status = 200, description = "Services in display order")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<service_model::Model>>, JsonApiError> {
    Ok(Json(svc::list_services(&state.db).await?))
}

#[utoipa::path(get, path = "/api/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Category"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<service_model::Model>, JsonApiError> {
    svc::get_service(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("service not found"))
}

#[utoipa::path(post, path = "/api/services", tag = "services", security(("bearer" = [])), request_body = NewService, responses((status = 201, description = "Created, appended last"), (status = 400, description = "Invalid input")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewService>) -> Result<(StatusCode, Json<service_model::Model>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(svc::create_service(&state.db, input).await?)))
}

#[utoipa::path(put, path = "/api/services/{id}", tag = "services", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Service id")), request_body = ServicePatch, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<ServicePatch>) -> Result<Json<service_model::Model>, JsonApiError> {
    Ok(Json(svc::update_service(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/services/{id}", tag = "services", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Service id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_service(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("service not found")) }
}

#[utoipa::path(post, path = "/api/services/reorder", tag = "services", security(("bearer" = [])), request_body = ReorderInput, responses((status = 200, description = "Positions rewritten"), (status = 400, description = "Empty or duplicate ids"), (status = 404, description = "Unknown id")))]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<Json<Ack>, JsonApiError> {
    svc::reorder_services(&state.db, &input.ids()).await?;
    Ok(Json(Ack::ok()))
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/api/services", get(list))
        .route("/api/services/:id", get(get_one));
    let admin = Router::new()
        .route("/api/services", post(create))
        .route("/api/services/reorder", post(reorder))
        .route("/api/services/:id", put(update).delete(remove));
    public.merge(super::admin_only(state, admin))
}
