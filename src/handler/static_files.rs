//! Static asset gateway
//!
//! Resolves the entry document and sub-resources of the editor bundle
//! against a fixed asset root.

use std::io;
use std::path::{Path, PathBuf};

use hyper::body::Bytes;
use tokio::fs;

use crate::error::GatewayError;
use crate::http::{mime, Asset, CachePolicy};

/// Serves files from one asset root. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct AssetGateway {
    root: PathBuf,
    index_file: String,
}

impl AssetGateway {
    pub fn new(root: impl Into<PathBuf>, index_file: &str) -> Self {
        Self {
            root: root.into(),
            index_file: index_file.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entry document at the bare route prefix, always with no-cache headers
    pub async fn serve_entry(&self) -> Result<Asset, GatewayError> {
        let index_path = self.root.join(&self.index_file);
        if !is_file(&index_path).await? {
            return Err(GatewayError::EntryMissing);
        }
        let mut asset = load_file(&index_path).await?;
        asset.cache = CachePolicy::NoCache;
        Ok(asset)
    }

    /// Sub-resource below the route prefix.
    ///
    /// A directory is served through its index file. Files are served as-is.
    pub async fn serve_sub_resource(&self, sub_path: &str) -> Result<Asset, GatewayError> {
        validate_sub_path(sub_path)?;
        let file_path = self.root.join(sub_path);

        let meta = match fs::metadata(&file_path).await {
            Ok(meta) => meta,
            Err(e) if is_missing(&e) => return Err(GatewayError::NotFound),
            Err(e) => return Err(e.into()),
        };

        if meta.is_dir() {
            let index_path = file_path.join(&self.index_file);
            if is_file(&index_path).await? {
                return load_file(&index_path).await;
            }
        }

        if meta.is_file() {
            return load_file(&file_path).await;
        }

        Err(GatewayError::NotFound)
    }
}

/// Reject sub-paths that contain `..` anywhere or start with `/`.
///
/// This is a textual check on the raw segment, not a containment check on the
/// resolved path: encoded separators, `\` on Windows and symlinks inside the
/// root are not handled.
pub fn validate_sub_path(sub_path: &str) -> Result<(), GatewayError> {
    if sub_path.contains("..") || sub_path.starts_with('/') {
        return Err(GatewayError::InvalidPath);
    }
    Ok(())
}

async fn is_file(path: &Path) -> Result<bool, GatewayError> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if is_missing(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn load_file(path: &Path) -> Result<Asset, GatewayError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        // Removed between the metadata check and the read
        Err(e) if is_missing(&e) => return Err(GatewayError::NotFound),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read asset");
            return Err(e.into());
        }
    };

    Ok(Asset {
        bytes: Bytes::from(bytes),
        content_type: mime::content_type_for(path),
        cache: CachePolicy::Unspecified,
    })
}

/// `NotFound`, `NotADirectory` when a path component is a regular file, or
/// `InvalidInput` for names no file can have (interior NUL byte)
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput
    )
}
