use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use common::types::Ack;
use models::category;
use service::categories::{self as svc, CategoryPatch, NewCategory};
use service::ordering::ReorderInput;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};

#[utoipa::path(get, path = "/api/categories", tag = "categories", responses((status = 200, description = "Categories in display order")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<category::Model>>, JsonApiError> {
    Ok(Json(svc::list_categories(&state.db).await?))
}

#[utoipa::path(get, path = "/api/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")), responses((status = 200, description = "Category"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<category::Model>, JsonApiError> {
    svc::get_category(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("category not found"))
}

#[utoipa::path(post, path = "/api/categories", tag = "categories", security(("bearer" = [])), request_body = NewCategory, responses((status = 201, description = "Created, appended last"), (status = 400, description = "Invalid input"), (status = 409, description = "Slug in use")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewCategory>) -> Result<(StatusCode, Json<category::Model>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(svc::create_category(&state.db, input).await?)))
}

#[utoipa::path(put, path = "/api/categories/{id}", tag = "categories", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Category id")), request_body = CategoryPatch, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<CategoryPatch>) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(svc::update_category(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/categories/{id}", tag = "categories", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Category id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_category(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("category not found")) }
}

#[utoipa::path(post, path = "/api/categories/reorder", tag = "categories", security(("bearer" = [])), request_body = ReorderInput, responses((status = 200, description = "Positions rewritten"), (status = 400, description = "Empty or duplicate ids"), (status = 404, description = "Unknown id")))]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<Json<Ack>, JsonApiError> {
    svc::reorder_categories(&state.db, &input.ids()).await?;
    Ok(Json(Ack::ok()))
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/api/categories", get(list))
        .route("/api/categories/:id", get(get_one));
    let admin = Router::new()
        .route("/api/categories", post(create))
        .route("/api/categories/reorder", post(reorder))
        .route("/api/categories/:id", put(update).delete(remove));
    public.merge(super::admin_only(state, admin))
}
