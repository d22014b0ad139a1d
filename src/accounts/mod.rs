//! Registration, login and bearer sessions.
//!
//! Accounts are the primary identity source for owned notes. Emails are compared in
//! trimmed, lowercase form.

mod crypto;

use chrono::{Duration, Utc};

use crate::db::AccountRepository;
use crate::errors::AppError;
use crate::models::{Account, LoginRequest, RegisterRequest, SessionGrant};

pub use crypto::{generate_token, hash_token};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account operations on top of the account repository.
#[derive(Clone)]
pub struct AccountService {
    repo: AccountRepository,
    session_ttl_days: i64,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a registration form. Returns the normalized email.
pub fn validate_registration(request: &RegisterRequest) -> Result<String, AppError> {
    let email = normalize_email(&request.email);
    if email.is_empty() || request.password.is_empty() || request.confirm_password.is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    if request.password != request.confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password should be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(email)
}

async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        AppError::Internal("Background task failed".to_string())
    })
}

impl AccountService {
    pub fn new(repo: AccountRepository, session_ttl_days: i64) -> Self {
        Self {
            repo,
            session_ttl_days,
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Account, AppError> {
        let email = validate_registration(request)?;

        let password = request.password.clone();
        let password_hash = run_blocking(move || crypto::hash_password(&password)).await??;

        let account = self.repo.create_account(&email, &password_hash).await?;
        tracing::info!("Registered account {}", account.id);
        Ok(account)
    }

    /// Verify credentials and issue a new session.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionGrant, AppError> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "Please enter both email and password".to_string(),
            ));
        }

        let rejected = || AppError::Unauthorized("Invalid email or password".to_string());

        let credentials = self
            .repo
            .find_credentials(&email)
            .await?
            .ok_or_else(rejected)?;

        let password = request.password.clone();
        let hash = credentials.password_hash.clone();
        let verified = run_blocking(move || crypto::verify_password(&password, &hash)).await?;
        if !verified {
            tracing::debug!("Rejected login for account {}", credentials.account.id);
            return Err(rejected());
        }

        let expires_at = Duration::try_days(self.session_ttl_days)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                tracing::error!("Session TTL of {} days is out of range", self.session_ttl_days);
                AppError::Internal("Session could not be issued".to_string())
            })?;
        let token = generate_token();
        self.repo
            .create_session(&credentials.account, &hash_token(&token), expires_at.timestamp())
            .await?;

        tracing::info!("Session issued for account {}", credentials.account.id);
        Ok(SessionGrant {
            token,
            email: credentials.account.email,
            expires_at: expires_at.to_rfc3339(),
        })
    }

    /// End a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.repo.delete_session(&hash_token(token)).await
    }

    /// Email of the live session for `token`, if any.
    pub async fn session_email(&self, token: &str) -> Result<Option<String>, AppError> {
        self.repo.session_email(&hash_token(token)).await
    }

    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        self.repo.purge_expired_sessions().await
    }
}
