//! PSK guard for the `/app` and `/action` surfaces.
//!
//! Keys are compared in constant time. HTMX callers get a 401 with the error header so the
//! drawer can show it; browsers are sent to the login page.

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::HX_ERROR_MESSAGE;
use crate::views::routes::LOGIN;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Set by htmx on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Middleware body; `expected_psk` of `None` lets every request through.
pub async fn psk_guard(expected_psk: Option<String>, request: Request, next: Next) -> Response {
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    let matched = provided_key(request.headers()).map(|key| constant_time_compare(key, &expected));
    match matched {
        Some(true) => next.run(request).await,
        Some(false) => {
            tracing::warn!(path = %request.uri().path(), "Rejected invalid API key");
            reject(request.headers(), "Invalid API key")
        }
        None => reject(request.headers(), "Missing or invalid API key"),
    }
}

/// `x-api-key`, falling back to a bearer token.
fn provided_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn reject(headers: &HeaderMap, message: &'static str) -> Response {
    if !is_htmx(headers) {
        return Redirect::to(LOGIN).into_response();
    }

    let mut response = StatusCode::UNAUTHORIZED.into_response();
    response
        .headers_mut()
        .insert(HX_ERROR_MESSAGE, HeaderValue::from_static(message));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
        assert!(!constant_time_compare("short", "much-longer-key"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer k1"));
        assert_eq!(provided_key(&headers), Some("k1"));

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("k2"));
        assert_eq!(provided_key(&headers), Some("k2"));
    }

    #[test]
    fn test_htmx_rejection_is_401_with_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HX_REQUEST, HeaderValue::from_static("true"));

        let response = reject(&headers, "Invalid API key");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(HX_ERROR_MESSAGE).unwrap(),
            "Invalid API key"
        );
    }

    #[tokio::test]
    async fn test_guard_passes_matching_key() {
        use axum::{body::Body, middleware, routing::get, Router};
        use tower::ServiceExt;

        let app = Router::new()
            .route("/app/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(|req, next| {
                psk_guard(Some("k1".to_string()), req, next)
            }));

        let request = axum::http::Request::builder()
            .uri("/app/ping")
            .header(API_KEY_HEADER, "k1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_browser_rejection_redirects_to_login() {
        let response = reject(&HeaderMap::new(), "Missing or invalid API key");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }
}
