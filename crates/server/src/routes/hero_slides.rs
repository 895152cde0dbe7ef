use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use common::types::Ack;
use models::hero_slide;
use service::hero_slides::{self as svc, HeroSlidePatch, NewHeroSlide, HeroSlideFilter};
use service::ordering::ReorderInput;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

#[utoipa::path(get, path = "/api/hero-slides", tag = "hero-slides", params(HeroSlideFilter), responses((status = 200, description = "Hero slides in display order")))]
pub async fn list(State(state): State<ServerState>, ApiQuery(filter): ApiQuery<HeroSlideFilter>) -> Result<Json<Vec<hero_slide::Model>>, JsonApiError> {
    Ok(Json(svc::list_hero_slides(&state.db, filter).await?))
}

#[utoipa::path(get, path = "/api/hero-slides/{id}", tag = "hero-slides", params(("id" = Uuid, Path, description = "Hero slide id")), responses((status = 200, description = "Category"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<hero_slide::Model>, JsonApiError> {
    svc::get_hero_slide(&state.db, id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("hero slide not found"))
}

#[utoipa::path(post, path = "/api/hero-slides", tag = "hero-slides", security(("bearer" = [])), request_body = NewHeroSlide, responses((status = 201, description = "Created, appended last"), (status = 400, description = "Invalid input")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewHeroSlide>) -> Result<(StatusCode, Json<hero_slide::Model>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(svc::create_hero_slide(&state.db, input).await?)))
}

#[utoipa::path(put, path = "/api/hero-slides/{id}", tag = "hero-slides", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Hero slide id")), request_body = HeroSlidePatch, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>, ApiJson(patch): ApiJson<HeroSlidePatch>) -> Result<Json<hero_slide::Model>, JsonApiError> {
    Ok(Json(svc::update_hero_slide(&state.db, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/hero-slides/{id}", tag = "hero-slides", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Hero slide id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    if svc::delete_hero_slide(&state.db, id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(JsonApiError::not_found("hero slide not found")) }
}

#[utoipa::path(post, path = "/api/hero-slides/reorder", tag = "hero-slides", security(("bearer" = [])), request_body = ReorderInput, responses((status = 200, description = "Positions rewritten"), (status = 400, description = "Empty or duplicate ids"), (status = 404, description = "Unknown id")))]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<Json<Ack>, JsonApiError> {
    svc::reorder_hero_slides(&state.db, &input.ids()).await?;
    Ok(Json(Ack::ok()))
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/api/hero-slides", get(list))
        .route("/api/hero-slides/:id", get(get_one));
    let admin = Router::new()
        .route("/api/hero-slides", post(create))
        .route("/api/hero-slides/reorder", post(reorder))
        .route("/api/hero-slides/:id", put(update).delete(remove));
    public.merge(super::admin_only(state, admin))
}
