//! User service — application-layer orchestration of authentication
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, NewUser, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    fn issue(&self, user: User) -> DomainResult<AuthResult> {
        let token = create_token(&user.id, &user.email, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().find_by_email(email.trim()).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        self.repos.users().record_login(&user.id).await?;
        info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account and sign it in.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResult> {
        let full_name = full_name.trim();
        let email = email.trim();

        if full_name.is_empty() {
            return Err(DomainError::Validation("Full name is required".into()));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if self.repos.users().find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email already registered: {}",
                email
            )));
        }

        let user = self.create_user(full_name, email, password, UserRole::Admin).await?;
        info!(user_id = %user.id, email = %user.email, "New user registered");
        self.issue(user)
    }

    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        self.repos
            .users()
            .create(NewUser {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
    }

    /// Creates the configured admin when no user exists yet.
    /// Returns whether an account was created.
    pub async fn ensure_default_admin(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<bool> {
        if self.repos.users().count().await? > 0 {
            return Ok(false);
        }
        self.create_user(full_name, email, password, UserRole::Admin).await?;
        info!(email, "Default admin user created");
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })
    }
}
