//! Logger module
//!
//! Diagnostics go through `tracing`; this module installs the subscriber and
//! owns the server lifecycle and access log lines.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use hyper::Version;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::registry::ExtensionRegistry;

/// Target used for access log lines, so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set. Should be called once at
/// application startup; later calls are ignored.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, registry: &ExtensionRegistry) {
    tracing::info!("Listening on: http://{addr}{}", config.assets.route_prefix);
    tracing::info!(root = %config.asset_root().display(), "Serving editor bundle");
    for (name, dir) in registry.entries() {
        tracing::info!(extension = %name, dir = %dir.display(), "Extension web directory");
    }
    match config.server.workers {
        Some(workers) => tracing::info!("Worker threads: {workers}"),
        None => tracing::info!("Worker threads: default (CPU cores)"),
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    tracing::info!(
        "Access log: {} ({})",
        if config.logging.access_log { "on" } else { "off" },
        config.logging.access_log_format
    );
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

/// HTTP version as it appears in a request line, without the `HTTP/` prefix
pub fn format_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version() {
        assert_eq!(format_version(Version::HTTP_10), "1.0");
        assert_eq!(format_version(Version::HTTP_11), "1.1");
        assert_eq!(format_version(Version::HTTP_2), "2.0");
    }
}
