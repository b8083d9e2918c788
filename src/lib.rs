//! Static asset gateway for the Polotno canvas editor extension.
//!
//! Serves a pre-built single-page bundle under `/polotno` and registers the
//! extension's web directory with the [`registry::ExtensionRegistry`] at
//! startup.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod registry;
pub mod server;

use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::registry::ExtensionRegistry;

/// Startup wiring shared by the binary and the integration tests: register
/// the extension web directory, then build the state every connection reads.
pub fn build_state(config: &Config) -> Arc<AppState> {
    let extensions = Arc::new(ExtensionRegistry::new());
    registry::register_extension(&extensions, &config.extension);
    Arc::new(AppState::new(config, extensions))
}
