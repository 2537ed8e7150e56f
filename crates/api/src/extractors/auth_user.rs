//! Bearer token authentication extractors.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use domain::services::TokenIdentity;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user recovered from the `Authorization: Bearer` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
}

impl From<TokenIdentity> for AuthUser {
    fn from(identity: TokenIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
        }
    }
}

/// Returns the bearer token, or `None` when the header is absent.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(Some)
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let identity = state.authenticator.verify_token(token)?;
        Ok(identity.into())
    }
}

/// Optional bearer authentication.
///
/// A missing header yields `None`. A header that is present but malformed or
/// carries an invalid token is rejected with 401.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => {
                let identity = state.authenticator.verify_token(token)?;
                Ok(OptionalAuthUser(Some(identity.into())))
            }
            None => Ok(OptionalAuthUser(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/profile");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_missing() {
        let parts = parts_with_header(None);
        assert!(matches!(bearer_token(&parts), Ok(None)));
    }

    #[test]
    fn test_bearer_token_present() {
        let parts = parts_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            bearer_token(&parts),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_user_auth_from_identity() {
        let auth: AuthUser = TokenIdentity {
            user_id: 3,
            email: "c@example.com".to_string(),
        }
        .into();
        assert_eq!(auth.user_id, 3);
        assert_eq!(auth.email, "c@example.com");
    }
}
