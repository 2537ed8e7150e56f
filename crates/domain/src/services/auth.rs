//! Authentication capability interface.
//!
//! Password hashing and token handling live behind [`Authenticator`] so that
//! domain services and stores carry no cryptographic dependency.

use crate::errors::DomainError;

/// Identity recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: i32,
    pub email: String,
}

/// Hashing and bearer token operations required by the user actions.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Produce a salted one-way hash of `password`.
    async fn hash_password(&self, password: &str) -> Result<String, DomainError>;

    /// Check `password` against a hash produced by [`Authenticator::hash_password`].
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError>;

    /// Issue a signed, time-limited token for the user.
    fn issue_token(&self, user_id: i32, email: &str) -> Result<String, DomainError>;

    /// Verify a token, failing with [`DomainError::Unauthorized`] if it is not acceptable.
    fn verify_token(&self, token: &str) -> Result<TokenIdentity, DomainError>;
}

/// Mock authenticator for development and testing.
///
/// Uses reversible "hashes" and unsigned tokens of the form
/// `mock-token:<user_id>:<email>`. Never use outside tests.
#[derive(Debug, Clone, Default)]
pub struct MockAuthenticator;

impl MockAuthenticator {
    const HASH_PREFIX: &'static str = "mock-hash:";
    const TOKEN_PREFIX: &'static str = "mock-token:";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Authenticator for MockAuthenticator {
    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("{}{}", Self::HASH_PREFIX, password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash
            .strip_prefix(Self::HASH_PREFIX)
            .is_some_and(|stored| stored == password))
    }

    fn issue_token(&self, user_id: i32, email: &str) -> Result<String, DomainError> {
        Ok(format!("{}{}:{}", Self::TOKEN_PREFIX, user_id, email))
    }

    fn verify_token(&self, token: &str) -> Result<TokenIdentity, DomainError> {
        let invalid = || DomainError::Unauthorized("Invalid or expired token".to_string());

        let rest = token.strip_prefix(Self::TOKEN_PREFIX).ok_or_else(invalid)?;
        let (id, email) = rest.split_once(':').ok_or_else(invalid)?;
        let user_id = id.parse().map_err(|_| invalid())?;

        Ok(TokenIdentity {
            user_id,
            email: email.to_string(),
        })
    }
}
