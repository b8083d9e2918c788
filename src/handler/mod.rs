//! Request handler module
//!
//! Routing dispatch plus the static asset gateway behind it.

pub mod router;
pub mod static_files;

// Re-export main entry points
pub use router::handle_request;
pub use static_files::AssetGateway;
