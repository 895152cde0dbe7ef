use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use models::experience;
use service::experiences::{self as svc, ExperiencePatch, NewExperience};

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};

#[utoipa::path(get, path = "/api/experiences", tag = "experiences", responses((status = 200, description = "Work history, newest first")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<experience::Model>>, JsonApiError> {
    Ok(Json(svc::list_experiences(&state.db).await?))
}

#[utoipa::path(get, path = "/api/experiences/{id}", tag = "experiences", params(("id" = Uuid, Path, description = "Experience id")), responses((status = 200, description = "Experience"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<experience::Model>, JsonApiError> {
    svc::get_experience(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("experience not found"))
}

#[utoipa::path(post, path = "/api/experiences", tag = "experiences", security(("bearer" = [])), request_body = NewExperience, responses((status = 201, description = "Created"), (status = 400, description = "Invalid input")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewExperience>) -> Result<(StatusCode, Json<experience::Model>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(svc::create_experience(&state.db, input).await?)))
}

#[utoipa::path(put, path = "/api/experiences/{id}", tag = "experiences", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Experience id")), request_body = ExperiencePatch, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<ExperiencePatch>) -> Result<Json<experience::Model>, JsonApiError> {
    Ok(Json(svc::update_experience(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/experiences/{id}", tag = "experiences", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Experience id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_experience(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("experience not found")) }
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/api/experiences", get(list))
        .route("/api/experiences/:id", get(get_one));
    let admin = Router::new()
        .route("/api/experiences", post(create))
        .route("/api/experiences/:id", put(update).delete(remove));
    public.merge(super::admin_only(state, admin))
}
