use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use common::types::Ack;
use models::project;
use service::projects::{self as svc, ProjectPatch, NewProject, ProjectFilter};
use service::ordering::ReorderInput;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

#[utoipa::path(get, path = "/api/projects", tag = "projects", params(ProjectFilter), responses((status = 200, description = "Projects in display order")))]
pub async fn list(State(state): State<ServerState>, ApiQuery(filter): ApiQuery<ProjectFilter>) -> Result<Json<Vec<project::Model>>, JsonApiError> {
    Ok(Json(svc::list_projects(&state.db, filter).await?))
}

#[utoipa::path(get, path = "/api/projects/{id}", tag = "projects", params(("id" = Uuid, Path, description = "Project id")), responses((status = 200, description = "Category"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<project::Model>, JsonApiError> {
    svc::get_project(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("project not found"))
}

#[utoipa::path(post, path = "/api/projects", tag = "projects", security(("bearer" = [])), request_body = NewProject, responses((status = 201, description = "Created, appended last"), (status = 400, description = "Invalid input"), (status = 409, description = "Slug in use")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewProject>) -> Result<(StatusCode, Json<project::Model>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(svc::create_project(&state.db, input).await?)))
}

#[utoipa::path(put, path = "/api/projects/{id}", tag = "projects", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Project id")), request_body = ProjectPatch, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<ProjectPatch>) -> Result<Json<project::Model>, JsonApiError> {
    Ok(Json(svc::update_project(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/projects/{id}", tag = "projects", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Project id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_project(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("project not found")) }
}

#[utoipa::path(post, path = "/api/projects/reorder", tag = "projects", security(("bearer" = [])), request_body = ReorderInput, responses((status = 200, description = "Positions rewritten"), (status = 400, description = "Empty or duplicate ids"), (status = 404, description = "Unknown id")))]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<Json<Ack>, JsonApiError> {
    svc::reorder_projects(&state.db, &input.ids()).await?;
    Ok(Json(Ack::ok()))
}

#[utoipa::path(get, path = "/api/projects/slug/{slug}", tag = "projects", params(("slug" = String, Path, description = "Project slug")), responses((status = 200, description = "Project"), (status = 404, description = "Not found")))]
pub async fn get_by_slug(State(state): State<ServerState>, ApiPath(slug): ApiPath<String>) -> Result<Json<project::Model>, JsonApiError> {
    svc::get_project_by_slug(&state.db, &slug).await?.map(Json).ok_or_else(|| JsonApiError::not_found("project not found"))
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/api/projects", get(list))
        .route("/api/projects/:id", get(get_one))
        .route("/api/projects/slug/:slug", get(get_by_slug));
    let admin = Router::new()
        .route("/api/projects", post(create))
        .route("/api/projects/reorder", post(reorder))
        .route("/api/projects/:id", put(update).delete(remove));
    public.merge(super::admin_only(state, admin))
}
