//! `site.json`: the re-importable manifest, and importing it back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use super::assets::{parse_data_url, DataUrlError};
use crate::model::{validate_site, Site, ValidationError};
use crate::store::{Blob, BlobStore, SiteStore, StoreError};

pub const MANIFEST_PATH: &str = "site.json";

pub const MANIFEST_WARNING: &str = "Generated by the site exporter. Do not edit this file by hand: \
its exact shape is required to import the site again.";

/// The site record plus the portable image side-map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "__WARNING__", default)]
    pub warning: String,
    #[serde(flatten)]
    pub site: Site,
    /// Blob id → `data:<mime>;base64,<bytes>`.
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new(site: Site, images: BTreeMap<String, String>) -> Self {
        Self {
            warning: MANIFEST_WARNING.to_owned(),
            site,
            images,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid site: {0}")]
    Invalid(#[from] ValidationError),

    #[error("image {blob_id} could not be decoded: {source}")]
    Image {
        blob_id: String,
        source: DataUrlError,
    },

    #[error("image {0} is referenced but missing from the manifest")]
    MissingImage(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// A validated manifest, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSite {
    pub site: Site,
    pub blobs: BTreeMap<String, Blob>,
}

/// Parse and validate a manifest. Nothing is written anywhere.
pub fn import_manifest(json: &str) -> Result<ImportedSite, ImportError> {
    let manifest: Manifest = serde_json::from_str(json)?;
    validate_site(&manifest.site)?;

    let mut blobs = BTreeMap::new();
    for (blob_id, data_url) in &manifest.images {
        let blob = parse_data_url(data_url).map_err(|source| ImportError::Image {
            blob_id: blob_id.clone(),
            source,
        })?;
        blobs.insert(blob_id.clone(), blob);
    }
    if let Some(missing) = manifest
        .site
        .referenced_blobs()
        .into_iter()
        .find(|id| !blobs.contains_key(*id))
    {
        return Err(ImportError::MissingImage(missing.to_owned()));
    }

    Ok(ImportedSite {
        site: manifest.site,
        blobs,
    })
}

/// Import a manifest into the stores. The whole manifest is validated before
/// the first write.
#[instrument(skip_all)]
pub async fn import_into(
    json: &str,
    sites: &dyn SiteStore,
    blobs: &dyn BlobStore,
) -> Result<Site, ImportError> {
    let imported = import_manifest(json)?;
    for (id, blob) in imported.blobs {
        blobs.put_blob(&id, blob).await?;
    }
    sites.put_site(imported.site.clone()).await?;
    info!(site = %imported.site.id, "imported site");
    Ok(imported.site)
}
