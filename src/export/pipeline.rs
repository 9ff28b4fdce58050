//! The static-site export pipeline.
//!
//! Stages run strictly in order and pages are processed one after another:
//!
//! 1. static assets (favicon, global stylesheet)
//! 2. per-page stylesheets
//! 3. per-page markup, with blob images decoded into `src/images/`
//! 4. document serialization with the trimmed webfont request
//! 5. the `site.json` manifest
//! 6. the finished zip
//!
//! Any failure aborts the whole run; there is no partial archive.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument};

use super::archive::SiteArchive;
use super::assets::{extension_for, to_data_url, AssetFetcher};
use super::config::ExportConfig;
use super::context::ExportContext;
use super::fonts::trim_webfont_url;
use super::manifest::{Manifest, MANIFEST_PATH};
use super::minify::{CssMinifier, HtmlMinifier, Minify};
use super::shell::{
    base_stylesheet_path, page_file_names, render_document, responsive_stylesheet_path,
    DocumentHead, FAVICON_PATH, GLOBAL_STYLESHEET_PATH,
};
use crate::compiler::forward::{compile_page, BLOB_ID_ATTRIBUTE};
use crate::compiler::stylesheet::synthesize;
use crate::css::breakpoint::Breakpoint;
use crate::dom::serialize::{body_html, SerializeOptions};
use crate::dom::tree::MarkupTree;
use crate::model::{validate_site, Page, Site, ValidationError};
use crate::store::{BlobStore, Notice, Notifier, StoreError, TracingNotifier};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid site: {0}")]
    InvalidSite(#[from] ValidationError),

    #[error("favicon {url} could not be fetched: {source}")]
    Favicon { url: String, source: StoreError },

    #[error("image blob {blob_id} could not be read: {source}")]
    Blob { blob_id: String, source: StoreError },

    #[error("invalid webfont url: {0}")]
    WebfontUrl(#[from] url::ParseError),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportedSite {
    /// Zip archive bytes.
    pub archive: Vec<u8>,
    /// Archive entry paths, in write order.
    pub files: Vec<String>,
    pub manifest: Manifest,
}

/// Exports sites as self-contained static bundles.
pub struct Exporter {
    config: ExportConfig,
    blobs: Arc<dyn BlobStore>,
    fetcher: Arc<dyn AssetFetcher>,
    notifier: Arc<dyn Notifier>,
    css_minifier: Box<dyn Minify>,
    html_minifier: Box<dyn Minify>,
}

impl Exporter {
    pub fn new(
        config: ExportConfig,
        blobs: Arc<dyn BlobStore>,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> Self {
        Self {
            config,
            blobs,
            fetcher,
            notifier: Arc::new(TracingNotifier),
            css_minifier: Box::new(CssMinifier),
            html_minifier: Box::new(HtmlMinifier),
        }
    }

    /// Set the notifier (builder).
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the minifiers (builder).
    pub fn with_minifiers(mut self, css: Box<dyn Minify>, html: Box<dyn Minify>) -> Self {
        self.css_minifier = css;
        self.html_minifier = html;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export `site`. The notifier hears about the outcome either way.
    #[instrument(skip_all, fields(site = %site.id))]
    pub async fn export(&self, site: &Site) -> Result<ExportedSite, ExportError> {
        match self.run(site).await {
            Ok(exported) => {
                info!(files = exported.files.len(), bytes = exported.archive.len(), "export finished");
                self.notifier
                    .notify(Notice::success(format!("Exported {}", site.name)));
                Ok(exported)
            }
            Err(err) => {
                self.notifier
                    .notify(Notice::failure(format!("Export failed: {err}")));
                Err(err)
            }
        }
    }

    async fn run(&self, site: &Site) -> Result<ExportedSite, ExportError> {
        validate_site(site)?;
        let mut archive = SiteArchive::new();
        let mut ctx = ExportContext::new();

        self.write_static_assets(&mut archive).await?;
        self.write_stylesheets(site, &mut archive)?;

        let mut trees = Vec::with_capacity(site.pages.len());
        for page in site.pages.values() {
            let tree = self.compile_markup(page, &mut archive, &mut ctx).await?;
            trees.push((page, tree));
        }

        self.write_documents(site, &trees, &ctx, &mut archive)?;

        let manifest = Manifest::new(site.clone(), ctx.into_images());
        archive.add(MANIFEST_PATH, manifest.to_json()?.as_bytes())?;

        let files = archive.entries().to_vec();
        let bytes = archive.finish()?;
        Ok(ExportedSite {
            archive: bytes,
            files,
            manifest,
        })
    }

    fn css(&self, text: &str) -> String {
        if self.config.minify {
            self.css_minifier.minify(text)
        } else {
            text.to_owned()
        }
    }

    #[instrument(skip_all)]
    async fn write_static_assets(&self, archive: &mut SiteArchive) -> Result<(), ExportError> {
        let url = &self.config.favicon_url;
        let favicon = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|source| ExportError::Favicon {
                url: url.clone(),
                source,
            })?;
        archive.add(FAVICON_PATH, &favicon)?;
        archive.add(
            GLOBAL_STYLESHEET_PATH,
            self.css(&self.config.global_css).as_bytes(),
        )?;
        Ok(())
    }

    #[instrument(skip_all)]
    fn write_stylesheets(&self, site: &Site, archive: &mut SiteArchive) -> Result<(), ExportError> {
        for page in site.pages.values() {
            let sheets = synthesize(page);
            archive.add(&base_stylesheet_path(&page.id), self.css(&sheets.base).as_bytes())?;
            archive.add(
                &responsive_stylesheet_path(&page.id),
                self.css(&sheets.responsive).as_bytes(),
            )?;
        }
        Ok(())
    }

    /// Compile one page and move its blob images into the archive.
    #[instrument(skip_all, fields(page = %page.id))]
    async fn compile_markup(
        &self,
        page: &Page,
        archive: &mut SiteArchive,
        ctx: &mut ExportContext,
    ) -> Result<MarkupTree, ExportError> {
        let mut tree = compile_page(page, Breakpoint::Monitor);

        let images = tree.query_all(|n| n.attribute(BLOB_ID_ATTRIBUTE).is_some());
        for node in images {
            let Some(blob_id) = tree
                .get(node)
                .and_then(|n| n.attribute(BLOB_ID_ATTRIBUTE))
                .map(str::to_owned)
            else {
                continue;
            };
            let path = match ctx.image_path(&blob_id) {
                Some(path) => path.to_owned(),
                None => {
                    let blob = self.blobs.get_blob(&blob_id).await.map_err(|source| {
                        ExportError::Blob {
                            blob_id: blob_id.clone(),
                            source,
                        }
                    })?;
                    let path = ctx.record_image(&blob_id, extension_for(&blob.mime), to_data_url(&blob));
                    archive.add(&path, &blob.data)?;
                    debug!(blob = %blob_id, path = %path, "wrote image");
                    path
                }
            };
            if let Some(node) = tree.get_mut(node) {
                node.set_attribute("src", path);
            }
        }

        ctx.record_fonts(tree.applied_font_families());
        Ok(tree)
    }

    #[instrument(skip_all)]
    fn write_documents(
        &self,
        site: &Site,
        trees: &[(&Page, MarkupTree)],
        ctx: &ExportContext,
        archive: &mut SiteArchive,
    ) -> Result<(), ExportError> {
        let webfont = match &self.config.webfont_url {
            Some(url) => trim_webfont_url(url, ctx.used_fonts())?,
            None => None,
        };
        let file_names = page_file_names(site);

        for (page, tree) in trees {
            let head = DocumentHead {
                title: page.document_title(),
                page_id: &page.id,
                description: site.description.as_deref(),
                webfont_url: webfont.as_deref(),
            };
            let body = body_html(tree, SerializeOptions::export(true), 2);
            let mut document = render_document(&head, &body);
            if self.config.minify {
                document = self.html_minifier.minify(&document);
            }
            let name = file_names
                .get(&page.id)
                .cloned()
                .unwrap_or_else(|| format!("{}.html", page.id));
            archive.add(&name, document.as_bytes())?;
        }
        Ok(())
    }
}
