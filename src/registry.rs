//! Extension web directory registry
//!
//! Maps an extension name to the static-asset directory the host serves for
//! it. Written once during startup through [`ExtensionRegistry::register_web_dir`];
//! read-only afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::config::ExtensionConfig;

#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    web_dirs: RwLock<HashMap<String, PathBuf>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the web directory for `name`.
    ///
    /// A directory that does not exist yet is still registered; the host only
    /// consults it when serving, so a missing directory is just a warning.
    pub fn register_web_dir(&self, name: &str, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !dir.is_dir() {
            tracing::warn!(
                extension = name,
                dir = %dir.display(),
                "extension web directory does not exist"
            );
        }

        let previous = self
            .web_dirs
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(name.to_string(), dir.clone());

        match previous {
            Some(old) if old != dir => tracing::info!(
                extension = name,
                old = %old.display(),
                new = %dir.display(),
                "replaced extension web directory"
            ),
            _ => tracing::info!(
                extension = name,
                dir = %dir.display(),
                "registered extension web directory"
            ),
        }
    }

    pub fn web_dir(&self, name: &str) -> Option<PathBuf> {
        self.web_dirs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Snapshot of all registrations, sorted by extension name
    pub fn entries(&self) -> Vec<(String, PathBuf)> {
        let mut entries: Vec<_> = self
            .web_dirs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|(name, dir)| (name.clone(), dir.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// Canonicalize `dir` when it exists, so the registered path does not depend
/// on the process working directory.
pub fn resolve_web_dir(dir: &Path) -> PathBuf {
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

/// Startup registration of the configured extension web directory.
/// Returns the path that was registered.
pub fn register_extension(registry: &ExtensionRegistry, extension: &ExtensionConfig) -> PathBuf {
    let dir = resolve_web_dir(&extension.web_dir_path());
    registry.register_web_dir(&extension.name, dir.clone());
    dir
}
