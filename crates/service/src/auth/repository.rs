use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, email: &str, name: &str, role: &str, password_hash: String) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, (AuthUser, String)>>, // key: user id, value: (user, hash)
    }

    impl MockAuthRepository {
        /// Drop a user, as if deleted by another admin.
        pub fn remove(&self, id: Uuid) {
            self.users.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let email = email.trim().to_ascii_lowercase();
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&id).map(|(u, _)| u.clone()))
        }

        async fn create_user(&self, email: &str, name: &str, role: &str, password_hash: String) -> Result<AuthUser, AuthError> {
            let email = email.trim().to_ascii_lowercase();
            let mut users = self.users.lock().unwrap();
            if users.values().any(|(u, _)| u.email == email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: Uuid::new_v4(), email, name: name.to_string(), role: role.to_string() };
            users.insert(user.id, (user.clone(), password_hash));
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&user_id).map(|(_, h)| Credentials { user_id, password_hash: h.clone() }))
        }
    }
}
