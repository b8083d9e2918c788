// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::handler::AssetGateway;
use crate::registry::ExtensionRegistry;

/// Application state
pub struct AppState {
    pub config: Config,
    pub gateway: AssetGateway,
    pub registry: Arc<ExtensionRegistry>,
    access_log: bool,
}

impl AppState {
    pub fn new(config: &Config, registry: Arc<ExtensionRegistry>) -> Self {
        let gateway = AssetGateway::new(config.asset_root(), &config.assets.index_file);
        Self {
            config: config.clone(),
            gateway,
            registry,
            access_log: config.logging.access_log,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.access_log
    }
}
