//! Account and session persistence.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::Account;

/// Stored credentials for one account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account: Account,
    pub password_hash: String,
}

/// Repository for the `accounts` and `sessions` tables.
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account. A taken email is a conflict.
    pub async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Account {
                id,
                email: email.to_string(),
                created_at: now,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict(format!("An account for {} already exists", email)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, AppError> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Credentials {
            account: Account {
                id: row.get("id"),
                email: row.get("email"),
                created_at: row.get("created_at"),
            },
            password_hash: row.get("password_hash"),
        }))
    }

    pub async fn create_session(
        &self,
        account: &Account,
        token_hash: &str,
        expires_at: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO sessions (token_hash, account_id, email, created_at, expires_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(token_hash)
        .bind(&account.id)
        .bind(&account.email)
        .bind(Utc::now().to_rfc3339())
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Email of the live session with this token hash.
    pub async fn session_email(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT email FROM sessions WHERE token_hash = ? AND expires_at > ?")
            .bind(token_hash)
            .bind(Utc::now().timestamp())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("email")))
    }

    pub async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Drop sessions that are past their expiry. Returns how many were removed.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
