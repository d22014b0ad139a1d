//! Account API endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult, Caller};
use crate::errors::AppError;
use crate::identity::resolve_identity;
use crate::models::{Account, Identity, LoginRequest, RegisterRequest, SessionGrant};
use crate::AppState;

/// POST /api/auth/register - Create an account.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Account> {
    let account = state.accounts.register(&request).await?;
    success(account)
}

/// POST /api/auth/login - Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionGrant> {
    let grant = state.accounts.login(&request).await?;
    success(grant)
}

/// POST /api/auth/logout - End the bearer session.
pub async fn logout(State(state): State<AppState>, caller: Caller) -> ApiResult<()> {
    let token = caller
        .session_token()
        .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;

    state.accounts.logout(token).await?;
    success(())
}

/// GET /api/auth/me - The identity this request resolves to.
pub async fn current_identity(caller: Caller) -> ApiResult<Identity> {
    let email = resolve_identity(&caller).await?;
    success(Identity { email })
}
