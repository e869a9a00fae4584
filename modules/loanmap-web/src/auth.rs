use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;

/// HTTP Basic auth gate for every route, checked against the single
/// configured username/password pair.
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(base64_decode)
        .map(|creds| {
            let expected = format!(
                "{}:{}",
                state.config.dashboard_username, state.config.dashboard_password
            );
            constant_time_eq(creds.as_bytes(), expected.as_bytes())
        })
        .unwrap_or(false);

    if authorized {
        return next.run(request).await;
    }

    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(header::WWW_AUTHENTICATE, "Basic realm=\"dashboard\"")
        .body(Body::from("Unauthorized"))
        .unwrap()
        .into_response()
}

fn base64_decode(input: &str) -> Option<String> {
    // Simple base64 decode for basic auth
    let bytes = base64_decode_bytes(input)?;
    String::from_utf8(bytes).ok()
}

fn base64_decode_bytes(input: &str) -> Option<Vec<u8>> {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let input = input.trim_end_matches('=');
    let mut output = Vec::new();
    let mut buf: u32 = 0;
    let mut bits: u32 = 0;

    for &b in input.as_bytes() {
        let val = TABLE.iter().position(|&c| c == b)? as u32;
        buf = (buf << 6) | val;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            output.push((buf >> bits) as u8);
            buf &= (1 << bits) - 1;
        }
    }

    Some(output)
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::Request, middleware, routing::get, Router};
    use tower::ServiceExt;

    use loanmap_common::{config::WGS84_PROJ, Config};
    use loanmap_data::LoanDataset;

    fn gated_router() -> Router {
        let config = Config {
            boundary_path: String::new(),
            loans_path: String::new(),
            boundary_crs: WGS84_PROJ.to_string(),
            web_host: "127.0.0.1".to_string(),
            web_port: 8050,
            dashboard_username: "admin".to_string(),
            dashboard_password: "secret".to_string(),
            default_year: 2019,
        };
        let state = Arc::new(AppState {
            dataset: LoanDataset::from_parts(Vec::new(), Vec::new(), WGS84_PROJ),
            config,
        });

        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                require_basic_auth,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn request_without_credentials_gets_a_challenge() {
        let response = gated_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"dashboard\""
        );
    }

    #[tokio::test]
    async fn wrong_credentials_are_rejected() {
        // "admin:wrong"
        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::AUTHORIZATION, "Basic YWRtaW46d3Jvbmc=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn correct_credentials_pass_through() {
        // "admin:secret"
        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::AUTHORIZATION, "Basic YWRtaW46c2VjcmV0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn decodes_basic_credentials() {
        assert_eq!(
            base64_decode("ZHNkaXZpc2lvbjpzZWNyZXQ="),
            Some("dsdivision:secret".to_string())
        );
        assert_eq!(base64_decode("dXNlcjpwYXNz"), Some("user:pass".to_string()));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_eq!(base64_decode("not base64!"), None);
    }

    #[test]
    fn constant_time_eq_matches_equal_slices_only() {
        assert!(constant_time_eq(b"user:pass", b"user:pass"));
        assert!(!constant_time_eq(b"user:pass", b"user:PASS"));
        assert!(!constant_time_eq(b"short", b"longer-value"));
    }
}
