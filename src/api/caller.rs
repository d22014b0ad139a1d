//! Request extractor that resolves who is calling.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::errors::AppError;
use crate::identity::{CachedIdentity, FallbackIdentity, IdentitySource, SessionIdentity};
use crate::AppState;

/// Header carrying the email the client cached at its last login.
///
/// The value is trusted as-is when no live session is presented. Any client holding the
/// API key can therefore act as any user through this header, so the PSK is the trust
/// boundary for owned notes.
pub const CACHED_EMAIL_HEADER: &str = "x-cached-email";

/// Identity sources of one request: the bearer session, then the cached email.
#[derive(Clone)]
pub struct Caller {
    identity: FallbackIdentity<SessionIdentity, CachedIdentity>,
}

impl Caller {
    /// The bearer session token, if one was sent.
    pub fn session_token(&self) -> Option<&str> {
        self.identity.primary().token()
    }
}

impl IdentitySource for Caller {
    async fn identity(&self) -> Result<Option<String>, AppError> {
        self.identity.identity().await
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = SessionIdentity::new(state.accounts.clone(), bearer_token(&parts.headers));
        let cached = CachedIdentity::new(
            parts
                .headers
                .get(CACHED_EMAIL_HEADER)
                .and_then(|v| v.to_str().ok()),
        );

        Ok(Caller {
            identity: FallbackIdentity::new(session, cached),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
