//! Collaborator seams: blob and site storage, user notices.
//!
//! The compiler never talks to persistence or UI directly. The export and
//! import paths go through these traits; [`MemoryStore`] and the notifiers
//! below are the in-crate implementations.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::model::Site;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("blob not found: {0}")]
    BlobNotFound(String),

    #[error("site not found: {0}")]
    SiteNotFound(String),

    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// Blobs and sites
// ---------------------------------------------------------------------------

/// Binary asset bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime: String,
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(mime: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            mime: mime.into(),
            data: data.into(),
        }
    }
}

/// Side-table of binary assets keyed by blob id.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get_blob(&self, id: &str) -> Result<Blob, StoreError>;
    async fn put_blob(&self, id: &str, blob: Blob) -> Result<(), StoreError>;
}

/// Durable site records.
#[async_trait]
pub trait SiteStore: Send + Sync {
    async fn get_site(&self, id: &str) -> Result<Site, StoreError>;
    async fn put_site(&self, site: Site) -> Result<(), StoreError>;
}

/// In-memory blob and site store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, Blob>>,
    sites: RwLock<HashMap<String, Site>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob (builder).
    pub fn with_blob(mut self, id: impl Into<String>, blob: Blob) -> Self {
        self.blobs.get_mut().insert(id.into(), blob);
        self
    }

    /// Seed a site (builder).
    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.get_mut().insert(site.id.clone(), site);
        self
    }

    pub async fn blob_count(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn site_count(&self) -> usize {
        self.sites.read().await.len()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get_blob(&self, id: &str) -> Result<Blob, StoreError> {
        self.blobs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::BlobNotFound(id.to_owned()))
    }

    async fn put_blob(&self, id: &str, blob: Blob) -> Result<(), StoreError> {
        self.blobs.write().await.insert(id.to_owned(), blob);
        Ok(())
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn get_site(&self, id: &str) -> Result<Site, StoreError> {
        self.sites
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::SiteNotFound(id.to_owned()))
    }

    async fn put_site(&self, site: Site) -> Result<(), StoreError> {
        self.sites.write().await.insert(site.id.clone(), site);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Failure,
}

/// A user-facing, fire-and-forget message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Forwards notices to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "notice"),
            NoticeLevel::Failure => warn!(message = %notice.message, "notice"),
        }
    }
}

/// Keeps every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn memory_store_blobs() {
        let store = MemoryStore::new().with_blob("b1", Blob::new("image/png", vec![1, 2, 3]));
        assert_eq!(store.get_blob("b1").await.unwrap().data, vec![1, 2, 3]);
        assert!(matches!(
            store.get_blob("b2").await,
            Err(StoreError::BlobNotFound(id)) if id == "b2"
        ));
        store
            .put_blob("b2", Blob::new("image/jpeg", vec![9]))
            .await
            .unwrap();
        assert_eq!(store.blob_count().await, 2);
    }

    #[test]
    fn memory_store_sites() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store.put_site(Site::new("s1", "Site")).await.unwrap();
            assert_eq!(store.get_site("s1").await.unwrap().name, "Site");
            assert!(store.get_site("s2").await.is_err());
        });
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::failure("first"));
        notifier.notify(Notice::success("second"));
        let levels: Vec<NoticeLevel> = notifier.notices().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Failure, NoticeLevel::Success]);
    }
}
