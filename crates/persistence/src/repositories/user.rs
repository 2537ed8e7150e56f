//! User repository for database operations.

use domain::models::{NewUser, User};
use domain::services::UserStore;
use domain::DomainError;
use sqlx::PgPool;

use super::{is_unique_violation, storage_error};
use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Repository for user account database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, username, password AS password_hash,
                   "createdAt" AS created_at, "updatedAt" AS updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find a user by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, username, password AS password_hash,
                   "createdAt" AS created_at, "updatedAt" AS updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Create a new user account.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (email, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, username, password AS password_hash,
                      "createdAt" AS created_at, "updatedAt" AS updated_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }
}

#[async_trait::async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let row = UserRepository::find_by_id(self, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = UserRepository::find_by_email(self, email)
            .await
            .map_err(storage_error)?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        match self.create_user(&user).await {
            Ok(row) => Ok(User::from(row)),
            // Lost a race with a concurrent registration
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict(
                "User with this email already exists".to_string(),
            )),
            Err(e) => Err(storage_error(e)),
        }
    }
}
