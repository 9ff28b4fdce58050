//! Static asset fetching and binary encoding helpers.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

use crate::store::{Blob, StoreError};

/// Fetches static assets such as the favicon.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, StoreError>;
}

/// Serves assets from a fixed in-memory table.
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    assets: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset (builder).
    pub fn with_asset(mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(location.into(), bytes.into());
        self
    }
}

#[async_trait]
impl AssetFetcher for StaticFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, StoreError> {
        self.assets
            .get(location)
            .cloned()
            .ok_or_else(|| StoreError::AssetNotFound(location.to_owned()))
    }
}

/// Reads assets relative to a directory.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetFetcher for FsFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.root.join(location.trim_start_matches('/'));
        debug!(path = %path.display(), "reading asset");
        tokio::fs::read(&path).await.map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => StoreError::AssetNotFound(location.to_owned()),
            _ => StoreError::Io(err),
        })
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a data url")]
    NotDataUrl,

    #[error("data url is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// File extension for an image MIME type.
pub fn extension_for(mime: &str) -> &'static str {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/avif" => "avif",
        "image/svg+xml" => "svg",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        _ => "bin",
    }
}

/// `data:<mime>;base64,<bytes>`
pub fn to_data_url(blob: &Blob) -> String {
    format!("data:{};base64,{}", blob.mime, BASE64_STANDARD.encode(&blob.data))
}

/// Inverse of [`to_data_url`].
pub fn parse_data_url(input: &str) -> Result<Blob, DataUrlError> {
    let rest = input.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::NotDataUrl)?;
    let mime = header.strip_suffix(";base64").ok_or(DataUrlError::NotBase64)?;
    let data = BASE64_STANDARD.decode(payload)?;
    Ok(Blob::new(mime, data))
}
