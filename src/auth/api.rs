//! Authentication API Endpoints
//! Register, login, current account and logout

use crate::app::AppState;
use crate::auth::{
    errors::AuthError,
    models::{AccountResponse, Identity, LoginRequest, RegisterRequest, Role, TokenResponse},
};
use anyhow::Context;
use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::{
    extract::WithRejection,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::{info, warn};

/// Register endpoint - POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, AuthError>,
) -> Result<Json<TokenResponse>, AuthError> {
    info!("📝 Registration attempt: {} as {}", payload.email, payload.role);

    // bcrypt is CPU bound, keep it off the async workers
    let gate = state.gate.clone();
    let (token, account) = tokio::task::spawn_blocking(move || {
        gate.register(
            &payload.email,
            &payload.password,
            &payload.full_name,
            payload.role,
        )
    })
    .await
    .context("Registration task failed")??;

    if account.role == Role::Teacher {
        if let Err(e) = state.academy.create_teacher_profile(&account) {
            warn!("Failed to create teacher profile for {}: {:#}", account.email, e);
        }
    }

    Ok(Json(TokenResponse::new(token, &account)))
}

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> Result<Json<TokenResponse>, AuthError> {
    info!("🔐 Login attempt: {}", payload.email);

    let gate = state.gate.clone();
    let (token, account) =
        tokio::task::spawn_blocking(move || gate.login(&payload.email, &payload.password))
            .await
            .context("Login task failed")??;

    Ok(Json(TokenResponse::new(token, &account)))
}

/// Get current account - GET /api/auth/me
pub async fn get_current_account(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<AccountResponse>, AuthError> {
    let account = state
        .gate
        .store()
        .find_account_by_id(&identity.account_id)?
        .ok_or(AuthError::TokenInvalid)?;

    Ok(Json(AccountResponse::from_account(&account)))
}

/// Logout - POST /api/auth/logout
/// Revokes the presented token; other tokens of the same account stay valid.
pub async fn logout(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<StatusCode, AuthError> {
    state.gate.logout(bearer.token())?;
    Ok(StatusCode::NO_CONTENT)
}
