//! User account endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::metrics::record_auth_attempt;

/// Register a new account and return a bearer token.
///
/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let result = state.users.register(request).await;
    record_auth_attempt("register", result.is_ok());

    Ok((StatusCode::CREATED, Json(result?)))
}

/// Exchange email and password for a bearer token.
///
/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let result = state.users.login(request).await;
    record_auth_attempt("login", result.is_ok());

    Ok(Json(result?))
}

/// Profile of the authenticated user.
///
/// GET /api/users/profile
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.users.profile(user.user_id).await?;
    Ok(Json(profile))
}
