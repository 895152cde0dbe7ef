use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use common::types::Ack;
use models::skill;
use service::skills::{self as svc, SkillPatch, NewSkill, SkillFilter};
use service::ordering::ReorderInput;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

#[utoipa::path(get, path = "/api/skills", tag = "skills", params(SkillFilter), responses((status = 200, description = "Skills in display order")))]
pub async fn list(State(state): State<ServerState>, ApiQuery(filter): ApiQuery<SkillFilter>) -> Result<Json<Vec<skill::Model>>, JsonApiError> {
    Ok(Json(svc::list_skills(&state.db, filter).await?))
}

#[utoipa::path(get, path = "/api/skills/{id}", tag = "skills", params(("id" = Uuid, Path, description = "Skill id")), responses((status = 200, description = "Category"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<skill::Model>, JsonApiError> {
    svc::get_skill(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("skill not found"))
}

#[utoipa::path(post, path = "/api/skills", tag = "skills", security(("bearer" = [])), request_body = NewSkill, responses((status = 201, description = "Created, appended last"), (status = 400, description = "Invalid input")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewSkill>) -> Result<(StatusCode, Json<skill::Model>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(svc::create_skill(&state.db, input).await?)))
}

#[utoipa::path(put, path = "/api/skills/{id}", tag = "skills", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Skill id")), request_body = SkillPatch, responses((status = 200, description = "Updated; a category change appends to the new category"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<SkillPatch>) -> Result<Json<skill::Model>, JsonApiError> {
    Ok(Json(svc::update_skill(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/skills/{id}", tag = "skills", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Skill id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_skill(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("skill not found")) }
}

#[utoipa::path(post, path = "/api/skills/reorder", tag = "skills", security(("bearer" = [])), request_body = ReorderInput, responses((status = 200, description = "Positions rewritten"), (status = 400, description = "Empty, duplicate or mixed-category ids"), (status = 404, description = "Unknown id")))]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<Json<Ack>, JsonApiError> {
    svc::reorder_skills(&state.db, &input.ids()).await?;
    Ok(Json(Ack::ok()))
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/api/skills", get(list))
        .route("/api/skills/:id", get(get_one));
    let admin = Router::new()
        .route("/api/skills", post(create))
        .route("/api/skills/reorder", post(reorder))
        .route("/api/skills/:id", put(update).delete(remove));
    public.merge(super::admin_only(state, admin))
}
