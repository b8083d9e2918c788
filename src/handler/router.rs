//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, route matching
//! against the configured prefix, dispatch to the asset gateway and access
//! logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{REFERER, USER_AGENT};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::error::GatewayError;
use crate::http::{self, GatewayResponse};
use crate::logger::{self, AccessLogEntry};

/// Route a request path resolves to
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// Bare prefix, e.g. `/polotno`
    Entry,
    /// Raw (still percent-encoded) remainder after `/polotno/`
    SubResource(&'a str),
    /// Anything outside the prefix
    Unmatched,
}

/// Match `path` against the route table for `prefix`
pub fn match_route<'a>(prefix: &str, path: &'a str) -> Route<'a> {
    match path.strip_prefix(prefix) {
        Some("") => Route::Entry,
        Some(rest) => rest
            .strip_prefix('/')
            .map_or(Route::Unmatched, Route::SubResource),
        None => Route::Unmatched,
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let is_head = req.method() == Method::HEAD;

    let mut response = match check_http_method(req.method()) {
        Some(resp) => resp,
        None => route_request(req.uri().path(), &state, is_head).await,
    };
    http::set_server_name(&mut response, &state.config.http.server_name);

    if state.access_log_enabled() {
        log_access(&req, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Only GET and HEAD are routed
fn check_http_method(method: &Method) -> Option<GatewayResponse> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            tracing::debug!(%method, "method not allowed");
            Some(http::build_405_response())
        }
    }
}

async fn route_request(path: &str, state: &AppState, is_head: bool) -> GatewayResponse {
    let result = match match_route(&state.config.assets.route_prefix, path) {
        Route::Entry => state.gateway.serve_entry().await,
        Route::SubResource(raw) => match urlencoding::decode(raw) {
            Ok(sub_path) => state.gateway.serve_sub_resource(&sub_path).await,
            Err(_) => Err(GatewayError::InvalidPath),
        },
        Route::Unmatched => return http::build_404_response(is_head),
    };

    match result {
        Ok(asset) => http::build_asset_response(asset, is_head),
        Err(err) => {
            match &err {
                GatewayError::Io(e) => tracing::error!(path, error = %e, "failed to serve asset"),
                GatewayError::EntryMissing => tracing::warn!(
                    root = %state.gateway.root().display(),
                    "entry document missing, bundle not built"
                ),
                _ => tracing::debug!(path, error = %err, "request rejected"),
            }
            http::build_error_response(&err, is_head)
        }
    }
}

fn log_access<B>(
    req: &Request<B>,
    resp: &GatewayResponse,
    peer_addr: Option<SocketAddr>,
    started: Instant,
    state: &AppState,
) {
    let header = |name: hyper::header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.map_or_else(|| "-".to_string(), |a| a.ip().to_string()),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = logger::format_version(req.version()).to_string();
    entry.status = resp.status().as_u16();
    entry.body_bytes = if req.method() == Method::HEAD {
        0
    } else {
        resp.headers()
            .get(hyper::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::registry::ExtensionRegistry;
    use http_body_util::{BodyExt, Empty};
    use hyper::StatusCode;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn state_for(root: &std::path::Path) -> Arc<AppState> {
        let mut env = HashMap::new();
        env.insert(
            "POLOTNO_ASSETS__ROOT".to_string(),
            root.to_string_lossy().into_owned(),
        );
        env.insert("POLOTNO_LOGGING__ACCESS_LOG".to_string(), "false".to_string());
        let cfg = Config::load_with_env("does-not-exist/config", Some(env)).unwrap();
        Arc::new(AppState::new(&cfg, Arc::new(ExtensionRegistry::new())))
    }

    fn built_bundle() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>polotno</html>").unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/app.css"), "body{margin:0}").unwrap();
        fs::write(dir.path().join("assets/my file.js"), "spaced").unwrap();
        dir
    }

    async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> (StatusCode, Response<Full<Bytes>>) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Empty::<Bytes>::new())
            .unwrap();
        let resp = handle_request(req, Arc::clone(state), None).await.unwrap();
        (resp.status(), resp)
    }

    async fn body(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_match_route() {
        assert_eq!(match_route("/polotno", "/polotno"), Route::Entry);
        assert_eq!(match_route("/polotno", "/polotno/"), Route::SubResource(""));
        assert_eq!(
            match_route("/polotno", "/polotno/assets/a.js"),
            Route::SubResource("assets/a.js")
        );
        assert_eq!(match_route("/polotno", "/polotno//etc"), Route::SubResource("/etc"));
        assert_eq!(match_route("/polotno", "/polotnoextra"), Route::Unmatched);
        assert_eq!(match_route("/polotno", "/"), Route::Unmatched);
    }

    #[tokio::test]
    async fn test_entry_document() {
        let dir = built_bundle();
        let state = state_for(dir.path());
        let (status, resp) = send(&state, Method::GET, "/polotno").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["cache-control"], "no-cache, no-store, must-revalidate");
        assert_eq!(resp.headers()["pragma"], "no-cache");
        assert_eq!(resp.headers()["expires"], "0");
        assert_eq!(resp.headers()["server"], "polotno-gateway");
        assert_eq!(body(resp).await, "<html>polotno</html>");
    }

    #[tokio::test]
    async fn test_entry_document_missing() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());
        let (status, resp) = send(&state, Method::GET, "/polotno").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body(resp).await, crate::error::ENTRY_MISSING_MESSAGE);
    }

    #[tokio::test]
    async fn test_sub_resource_without_no_cache() {
        let dir = built_bundle();
        let state = state_for(dir.path());
        let (status, resp) = send(&state, Method::GET, "/polotno/assets/app.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/css; charset=utf-8");
        assert!(resp.headers().get("cache-control").is_none());
        assert!(resp.headers().get("pragma").is_none());
        assert!(resp.headers().get("expires").is_none());
        assert_eq!(body(resp).await, "body{margin:0}");
    }

    #[tokio::test]
    async fn test_percent_encoded_sub_path() {
        let dir = built_bundle();
        let state = state_for(dir.path());
        let (status, resp) = send(&state, Method::GET, "/polotno/assets/my%20file.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body(resp).await, "spaced");

        // Encoded dots are decoded before the traversal check
        let (status, resp) = send(&state, Method::GET, "/polotno/%2E%2E/secret").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body(resp).await, "Invalid path");
    }

    #[tokio::test]
    async fn test_invalid_paths() {
        let dir = built_bundle();
        let state = state_for(dir.path());
        for uri in ["/polotno/assets/../index.html", "/polotno//etc/passwd", "/polotno/%FF"] {
            let (status, resp) = send(&state, Method::GET, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body(resp).await, "Invalid path");
        }
    }

    #[tokio::test]
    async fn test_file_not_found() {
        let dir = built_bundle();
        let state = state_for(dir.path());
        let (status, resp) = send(&state, Method::GET, "/polotno/assets/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body(resp).await, "File not found");
    }

    #[tokio::test]
    async fn test_encoded_nul_is_file_not_found() {
        let dir = built_bundle();
        let state = state_for(dir.path());
        let (status, resp) = send(&state, Method::GET, "/polotno/a%00b.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body(resp).await, "File not found");
    }

    #[tokio::test]
    async fn test_outside_prefix() {
        let dir = built_bundle();
        let state = state_for(dir.path());
        let (status, resp) = send(&state, Method::GET, "/index.html").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body(resp).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_head_and_disallowed_methods() {
        let dir = built_bundle();
        let state = state_for(dir.path());

        let (status, resp) = send(&state, Method::HEAD, "/polotno").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["content-length"], "20");
        assert_eq!(resp.headers()["cache-control"], "no-cache, no-store, must-revalidate");
        assert!(body(resp).await.is_empty());

        let (status, resp) = send(&state, Method::POST, "/polotno").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, HEAD");
    }
}
