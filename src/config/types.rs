// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub extension: ExtensionConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Where the pre-built editor bundle lives and which URL prefix serves it
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// URL prefix, e.g. `/polotno`. No trailing slash.
    pub route_prefix: String,
    /// Asset root directory on disk. Relative paths are taken from `extension.dir`.
    pub root: PathBuf,
    /// Entry document name inside the root (and inside sub-directories)
    pub index_file: String,
}

/// Extension web directory registered at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ExtensionConfig {
    pub name: String,
    /// Extension install directory
    pub dir: PathBuf,
    /// Web directory, relative to `dir`
    pub web_dir: String,
}

impl ExtensionConfig {
    /// Absolute-or-relative path of the web directory to register
    pub fn web_dir_path(&self) -> PathBuf {
        self.dir.join(&self.web_dir)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
}
