//! User actions: register, login and profile.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

use super::auth::Authenticator;
use crate::errors::DomainError;
use crate::models::user::normalize_email;
use crate::models::{
    AuthResponse, LoginRequest, NewUser, ProfileResponse, PublicUser, RegisterRequest, User,
};

/// Storage seam for user accounts.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    /// Looks up by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Fails with [`DomainError::Conflict`] when the email is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;
}

fn invalid_credentials() -> DomainError {
    DomainError::Unauthorized("Invalid credentials".to_string())
}

fn email_taken() -> DomainError {
    DomainError::Conflict("User with this email already exists".to_string())
}

/// User action handlers.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    auth: Arc<dyn Authenticator>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, auth: Arc<dyn Authenticator>) -> Self {
        Self { store, auth }
    }

    pub async fn register(
        &self,
        mut request: RegisterRequest,
    ) -> Result<AuthResponse, DomainError> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        if self.store.find_by_email(&request.email).await?.is_some() {
            return Err(email_taken());
        }

        let password_hash = self.auth.hash_password(&request.password).await?;
        let user = self
            .store
            .insert(NewUser {
                email: request.email,
                username: request.username,
                password_hash,
            })
            .await?;

        let token = self.auth.issue_token(user.id, &user.email)?;

        info!(user_id = user.id, "User registered");
        Ok(AuthResponse {
            user: PublicUser::from(&user),
            token,
        })
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, mut request: LoginRequest) -> Result<AuthResponse, DomainError> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        let Some(user) = self.store.find_by_email(&request.email).await? else {
            warn!("Login attempt for unknown email");
            return Err(invalid_credentials());
        };

        if !self
            .auth
            .verify_password(&request.password, &user.password_hash)
            .await?
        {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        let token = self.auth.issue_token(user.id, &user.email)?;

        info!(user_id = user.id, "User logged in");
        Ok(AuthResponse {
            user: PublicUser::from(&user),
            token,
        })
    }

    pub async fn profile(&self, user_id: i32) -> Result<ProfileResponse, DomainError> {
        self.store
            .find_by_id(user_id)
            .await?
            .map(ProfileResponse::from)
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))
    }
}

#[derive(Debug, Default)]
struct MockUsers {
    rows: Vec<User>,
    last_id: i32,
}

/// In-memory user store for development and testing.
#[derive(Debug, Default)]
pub struct MockUserStore {
    inner: Mutex<MockUsers>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user, simulating an account deleted after a token was issued.
    pub async fn remove(&self, id: i32) {
        self.inner.lock().await.rows.retain(|u| u.id != id);
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let mut inner = self.inner.lock().await;
        if inner.rows.iter().any(|u| u.email == user.email) {
            return Err(email_taken());
        }

        inner.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.last_id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(user.clone());
        Ok(user)
    }
}
