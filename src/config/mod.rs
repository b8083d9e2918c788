// Configuration module entry point
// Loads configuration from file + environment and holds the runtime state

mod state;
mod types;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, ExtensionConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Default config file, resolved without extension by the `config` crate
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `POLOTNO_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "POLOTNO";

impl Config {
    /// Load configuration from `config.toml` and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment when `env` is `Some`.
    pub fn load_with_env(
        config_path: &str,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8188)?
            .set_default("assets.route_prefix", "/polotno")?
            .set_default("assets.root", "polotno-ui")?
            .set_default("assets.index_file", "index.html")?
            .set_default("extension.name", "ComfyUI-PolotnoCanvasEditor")?
            .set_default("extension.dir", ".")?
            .set_default("extension.web_dir", "js")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "polotno-gateway")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.assets.route_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "assets.route_prefix must start with '/' and must not end with '/': {prefix:?}"
            )));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.assets.index_file.is_empty() || self.assets.index_file.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "assets.index_file must be a plain file name: {:?}",
                self.assets.index_file
            )));
        }
        Ok(())
    }

    /// Absolute asset root, resolved once at startup. A relative
    /// `assets.root` sits under `extension.dir`, next to the web directory.
    pub fn asset_root(&self) -> PathBuf {
        let joined = self.extension.dir.join(&self.assets.root);
        std::path::absolute(&joined).unwrap_or(joined)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("Invalid address: {e}")))
    }
}
