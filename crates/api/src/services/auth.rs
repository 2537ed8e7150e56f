//! Production [`Authenticator`]: Argon2id password hashes and HS256 bearer tokens.

use domain::services::{Authenticator, TokenIdentity};
use domain::DomainError;
use shared::jwt::{JwtError, TokenSigner};
use shared::password::{self, PasswordError};
use tracing::{debug, warn};

use crate::config::JwtAuthConfig;

/// Authenticator backed by the `shared` crypto helpers.
///
/// Hashing runs on the blocking pool so request workers are not stalled.
#[derive(Debug, Clone)]
pub struct JwtAuthenticator {
    signer: TokenSigner,
}

impl JwtAuthenticator {
    pub fn new(config: &JwtAuthConfig) -> Self {
        Self {
            signer: TokenSigner::with_leeway(
                &config.secret,
                config.token_expiry_secs,
                config.leeway_secs,
            ),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> DomainError {
    DomainError::Internal(format!("Password task failed: {}", e))
}

#[async_trait::async_trait]
impl Authenticator for JwtAuthenticator {
    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(join_error)?
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        let result =
            tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
                .await
                .map_err(join_error)?;

        match result {
            Ok(matches) => Ok(matches),
            // A corrupt stored hash can never match
            Err(PasswordError::InvalidHashFormat) => {
                warn!("Stored password hash is not an Argon2 PHC string");
                Ok(false)
            }
            Err(e) => Err(DomainError::Internal(e.to_string())),
        }
    }

    fn issue_token(&self, user_id: i32, email: &str) -> Result<String, DomainError> {
        self.signer
            .issue(user_id, email)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<TokenIdentity, DomainError> {
        let claims = self.signer.verify(token).map_err(|e| {
            debug!(error = %e, "Bearer token rejected");
            match e {
                JwtError::TokenExpired => {
                    DomainError::Unauthorized("Token has expired".to_string())
                }
                _ => DomainError::Unauthorized("Invalid or expired token".to_string()),
            }
        })?;

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(TokenIdentity {
            user_id,
            email: claims.email,
        })
    }
}
