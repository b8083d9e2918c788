//! HTTP response building module
//!
//! Builders for the handful of responses the gateway sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_LENGTH, CONTENT_TYPE, SERVER};
use hyper::{Response, StatusCode};

use super::cache::CachePolicy;
use crate::error::GatewayError;

pub type GatewayResponse = Response<Full<Bytes>>;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// A file read from the asset root, ready to be sent
#[derive(Debug, Clone)]
pub struct Asset {
    pub bytes: Bytes,
    pub content_type: &'static str,
    pub cache: CachePolicy,
}

/// Build 200 response for a served asset
pub fn build_asset_response(asset: Asset, is_head: bool) -> GatewayResponse {
    let content_length = asset.bytes.len();
    let body = if is_head { Bytes::new() } else { asset.bytes };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, asset.content_type)
        .header(CONTENT_LENGTH, content_length);
    for (name, value) in asset.cache.headers() {
        builder = builder.header(name, *value);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(StatusCode::OK, &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build plain-text response
pub fn build_text_response(status: StatusCode, text: String, is_head: bool) -> GatewayResponse {
    let content_length = text.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(text) };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = status;
            resp
        })
}

/// Build the response for a request that did not resolve to a file
pub fn build_error_response(err: &GatewayError, is_head: bool) -> GatewayResponse {
    build_text_response(err.status(), err.body(), is_head)
}

/// Build 404 Not Found response for paths outside the gateway's routes
pub fn build_404_response(is_head: bool) -> GatewayResponse {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found".to_string(), is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> GatewayResponse {
    let mut resp = build_text_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "405 Method Not Allowed".to_string(),
        false,
    );
    resp.headers_mut()
        .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
    resp
}

/// Stamp the configured `Server` header on a response
pub fn set_server_name(resp: &mut GatewayResponse, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            resp.headers_mut().insert(SERVER, value);
        }
        Err(e) => tracing::warn!(server_name, error = %e, "invalid Server header value"),
    }
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    tracing::error!(%status, %error, "failed to build response");
}
