//! PSK-based API gate.
//!
//! Only clients holding the pre-shared app key may reach `/api`. User identity is
//! resolved separately from the bearer session. Keys are compared in constant time.

use axum::{extract::Request, middleware::Next, response::IntoResponse, response::Response};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// PSK authentication layer function that takes the expected PSK as a parameter.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no PSK is configured, allow all requests (dev mode)
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(provided_key) if constant_time_compare(provided_key, &expected) => {
            next.run(request).await
        }
        Some(_) => AppError::Unauthorized("Invalid API key".to_string()).into_response(),
        None => AppError::Unauthorized("Missing API key".to_string()).into_response(),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn gated(psk: Option<&str>) -> Router {
        let psk = psk.map(str::to_string);
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(move |req, next| {
                psk_auth_layer(psk.clone(), req, next)
            }))
    }

    async fn status(router: Router, key: Option<&str>) -> StatusCode {
        let mut request = http::Request::builder().uri("/ping");
        if let Some(key) = key {
            request = request.header(API_KEY_HEADER, key);
        }
        router
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("app-key", "app-key"));
        assert!(!constant_time_compare("app-key", "app-kez"));
        assert!(!constant_time_compare("app", "app-key"));
        assert!(!constant_time_compare("", "app-key"));
    }

    #[tokio::test]
    async fn test_layer_checks_key() {
        assert_eq!(status(gated(Some("k1")), Some("k1")).await, StatusCode::OK);
        assert_eq!(
            status(gated(Some("k1")), Some("k2")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(gated(Some("k1")), None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_layer_open_without_psk() {
        assert_eq!(status(gated(None), None).await, StatusCode::OK);
    }
}
