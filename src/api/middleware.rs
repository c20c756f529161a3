//! Request logging middleware.

use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::info;

const SKIPPED_PREFIXES: [&str; 1] = ["/static"];
const SKIPPED_PATHS: [&str; 2] = ["/favicon.ico", "/health"];

/// Client address as reported by the reverse proxy, or `"unknown"`.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Whether requests to `path` are worth a log line.
pub fn is_logged(path: &str) -> bool {
    !SKIPPED_PATHS.contains(&path) && !SKIPPED_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Logs method, path, client and timing for every API request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let ip = client_ip(request.headers());
    let started = Instant::now();

    let response = next.run(request).await;

    if is_logged(&path) {
        info!(
            method = %method,
            path = %path,
            ip = %ip,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "request served"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", " 192.168.1.20 ".parse().unwrap());
        assert_eq!(client_ip(&headers), "192.168.1.20");
    }

    #[test]
    fn test_client_ip_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");

        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "".parse().unwrap());
        assert_eq!(client_ip(&headers), "unknown");
    }

    #[test]
    fn test_skipped_paths() {
        assert!(is_logged("/"));
        assert!(is_logged("/api/weather"));
        assert!(!is_logged("/health"));
        assert!(!is_logged("/favicon.ico"));
        assert!(!is_logged("/static/cat_fallback.gif"));
    }
}
