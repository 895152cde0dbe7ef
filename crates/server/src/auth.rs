use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use sea_orm::DatabaseConnection;
use tracing::warn;

use service::auth::domain::AuthUser;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};

use crate::errors::JsonApiError;

pub type ServerAuth = AuthService<SeaOrmAuthRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<ServerAuth>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: AuthConfig) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        Self { db, auth: Arc::new(AuthService::new(repo, cfg)) }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, JsonApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| JsonApiError::unauthorized("missing Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| JsonApiError::unauthorized("expected Authorization: Bearer <token>"))
}

async fn resolve(state: &ServerState, headers: &HeaderMap, path: &str) -> Result<AuthUser, JsonApiError> {
    let token = bearer_token(headers)?;
    state.auth.authenticate(token).await.map_err(|e| {
        warn!(%path, error = %e, "token rejected");
        JsonApiError::from(e)
    })
}

/// Any signed-in user; the identity is stored as a request extension.
pub async fn require_user(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let user = resolve(&state, req.headers(), req.uri().path()).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Signed-in admin; 401 without a valid token, 403 for other roles.
pub async fn require_admin(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let user = resolve(&state, req.headers(), req.uri().path()).await?;
    ServerAuth::ensure_admin(&user)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
