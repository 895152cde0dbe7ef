use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (business view, never carries the hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool { self.role == models::user::ROLE_ADMIN }
}

impl From<models::user::Model> for AuthUser {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, email: u.email, name: u.name, role: u.role }
    }
}

/// Stored password hash for one user
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
}
