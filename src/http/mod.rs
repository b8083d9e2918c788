//! HTTP protocol layer module
//!
//! Content types, cache headers and response builders, independent of how
//! a request is routed.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use response::{
    build_404_response, build_405_response, build_asset_response, build_error_response,
    build_text_response, set_server_name, Asset, GatewayResponse,
};
