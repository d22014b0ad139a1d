//! Identity resolution for owned notes.
//!
//! The signed-in session is tried first and the client's cached email second. If
//! neither yields a user the operation fails before touching the store.

use std::future::Future;

use crate::accounts::AccountService;
use crate::errors::AppError;

/// Something that may know who the current user is.
pub trait IdentitySource: Send + Sync {
    /// The current user's email, or `None` when this source has no user.
    fn identity(&self) -> impl Future<Output = Result<Option<String>, AppError>> + Send;
}

/// The user behind a bearer session token.
#[derive(Clone)]
pub struct SessionIdentity {
    accounts: AccountService,
    token: Option<String>,
}

impl SessionIdentity {
    pub fn new(accounts: AccountService, token: Option<String>) -> Self {
        Self { accounts, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl IdentitySource for SessionIdentity {
    async fn identity(&self) -> Result<Option<String>, AppError> {
        match &self.token {
            Some(token) => {
                let email = self.accounts.session_email(token).await?;
                if email.is_none() {
                    tracing::debug!("Session token is unknown or expired");
                }
                Ok(email)
            }
            None => Ok(None),
        }
    }
}

/// The email a client cached at its last successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedIdentity(Option<String>);

impl CachedIdentity {
    /// Blank values count as absent.
    pub fn new(email: Option<&str>) -> Self {
        Self(
            email
                .map(|email| email.trim().to_lowercase())
                .filter(|email| !email.is_empty()),
        )
    }

    pub fn known(email: &str) -> Self {
        Self::new(Some(email))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl IdentitySource for CachedIdentity {
    async fn identity(&self) -> Result<Option<String>, AppError> {
        Ok(self.0.clone())
    }
}

/// Try `primary`, then `secondary`.
#[derive(Clone)]
pub struct FallbackIdentity<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackIdentity<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }
}

impl<P: IdentitySource, S: IdentitySource> IdentitySource for FallbackIdentity<P, S> {
    async fn identity(&self) -> Result<Option<String>, AppError> {
        if let Some(email) = self.primary.identity().await? {
            return Ok(Some(email));
        }
        self.secondary.identity().await
    }
}

/// Resolve the current user or fail with [`AppError::IdentityUnresolved`].
pub async fn resolve_identity<I: IdentitySource>(source: &I) -> Result<String, AppError> {
    source
        .identity()
        .await?
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(AppError::identity_unresolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        answer: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl IdentitySource for Counting {
        async fn identity(&self) -> Result<Option<String>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.clone())
        }
    }

    #[tokio::test]
    async fn test_primary_wins_without_consulting_fallback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = FallbackIdentity::new(
            CachedIdentity::known("a@example.com"),
            Counting {
                answer: Some("b@example.com".into()),
                calls: calls.clone(),
            },
        );

        assert_eq!(resolve_identity(&chain).await.unwrap(), "a@example.com");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_absent() {
        let chain = FallbackIdentity::new(
            CachedIdentity::absent(),
            CachedIdentity::known("b@example.com"),
        );
        assert_eq!(resolve_identity(&chain).await.unwrap(), "b@example.com");
    }

    #[tokio::test]
    async fn test_both_absent_is_unresolved() {
        let chain = FallbackIdentity::new(CachedIdentity::absent(), CachedIdentity::new(Some("  ")));
        assert_eq!(
            resolve_identity(&chain).await,
            Err(AppError::identity_unresolved())
        );
    }

    #[test]
    fn test_cached_identity_normalizes() {
        assert_eq!(
            CachedIdentity::new(Some(" A@Example.com ")),
            CachedIdentity::known("a@example.com")
        );
        assert_eq!(CachedIdentity::new(Some("")), CachedIdentity::absent());
    }
}
