use axum::extract::State;
use axum::{Extension, Json};

use service::auth::domain::{AuthSession, AuthUser, LoginInput};

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = LoginInput, responses((status = 200, description = "Logged in", body = AuthSession), (status = 401, description = "Invalid credentials")))]
pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<AuthSession>, JsonApiError> {
    Ok(Json(state.auth.login(input).await?))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", security(("bearer" = [])), responses((status = 200, description = "Current user", body = AuthUser), (status = 401, description = "Missing or invalid token")))]
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}
