use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};

use service::settings as svc;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[utoipa::path(get, path = "/api/settings", tag = "settings", responses((status = 200, description = "All settings as a key/value map", body = BTreeMap<String, String>)))]
pub async fn get_all(State(state): State<ServerState>) -> Result<Json<BTreeMap<String, String>>, JsonApiError> {
    Ok(Json(svc::get_settings(&state.db).await?))
}

#[utoipa::path(put, path = "/api/settings", tag = "settings", security(("bearer" = [])), request_body = BTreeMap<String, String>, responses((status = 200, description = "Merged settings after the upsert", body = BTreeMap<String, String>), (status = 400, description = "Invalid key or value")))]
pub async fn put_all(State(state): State<ServerState>, ApiJson(values): ApiJson<BTreeMap<String, String>>) -> Result<Json<BTreeMap<String, String>>, JsonApiError> {
    Ok(Json(svc::put_settings(&state.db, values).await?))
}

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new().route("/api/settings", get(get_all));
    let admin = Router::new().route("/api/settings", put(put_all));
    public.merge(super::admin_only(state, admin))
}
