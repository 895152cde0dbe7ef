use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

const MIN_PASSWORD_LEN: usize = 8;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl: Duration::hours(c.token_ttl_hours) }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: String,
    exp: usize,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }

    /// Create the configured admin unless a user with that e-mail exists.
    ///
    /// Returns the new user, or `None` when nothing was created.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use std::sync::Arc;
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), token_ttl: chrono::Duration::hours(1) };
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), cfg);
    /// let first = tokio_test::block_on(svc.bootstrap_admin("admin@studio.test", "Admin", "Passw0rd!")).unwrap();
    /// assert!(first.is_some());
    /// let again = tokio_test::block_on(svc.bootstrap_admin("admin@studio.test", "Admin", "Passw0rd!")).unwrap();
    /// assert!(again.is_none());
    /// ```
    #[instrument(skip(self, name, password))]
    pub async fn bootstrap_admin(&self, email: &str, name: &str, password: &str) -> Result<Option<AuthUser>, AuthError> {
        if let Some(existing) = self.repo.find_user_by_email(email).await? {
            debug!("bootstrap admin exists: {}", existing.email);
            return Ok(None);
        }
        let hash = Self::hash_password(password)?;
        let user = self.repo.create_user(email, name, models::user::ROLE_ADMIN, hash).await?;
        info!(user_id = %user.id, email = %user.email, "admin_bootstrapped");
        Ok(Some(user))
    }

    /// Verify credentials and issue a bearer token.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!("login_failed");
            return Err(AuthError::Unauthorized);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "login_succeeded");
        Ok(AuthSession { token, user })
    }

    pub fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let exp = (Utc::now() + self.cfg.token_ttl).timestamp() as usize;
        let claims = Claims { sub: user.id.to_string(), email: user.email.clone(), role: user.role.clone(), exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Resolve a bearer token to the current user record.
    ///
    /// The user is re-read so deletions and role changes apply immediately.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let data = decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::Unauthorized
            })?;
        let id = Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::Unauthorized)?;
        self.repo.find_user_by_id(id).await?.ok_or(AuthError::Unauthorized)
    }

    pub fn ensure_admin(user: &AuthUser) -> Result<(), AuthError> {
        if user.is_admin() { Ok(()) } else { Err(AuthError::Forbidden) }
    }
}
