use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::errors::ModelError;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn repo_err(e: impl std::fmt::Display) -> AuthError { AuthError::Repository(e.to_string()) }

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email).await.map_err(repo_err)?;
        Ok(res.map(AuthUser::from))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id).one(&self.db).await.map_err(repo_err)?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, email: &str, name: &str, role: &str, password_hash: String) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, email, name, password_hash, role)
            .await
            .map_err(|e| match e {
                ModelError::Validation(m) => AuthError::Validation(m),
                ModelError::Db(m) => AuthError::Repository(m),
            })?;
        Ok(AuthUser::from(created))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user::Entity::find_by_id(user_id).one(&self.db).await.map_err(repo_err)?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.password_hash }))
    }
}
