//! Static-site export: archive layout, assets, minification, the manifest
//! and its import inverse.

pub mod archive;
pub mod assets;
pub mod config;
pub mod context;
pub mod fonts;
pub mod manifest;
pub mod minify;
pub mod pipeline;
pub mod shell;

pub use assets::{AssetFetcher, FsFetcher, StaticFetcher};
pub use config::{ConfigError, ExportConfig};
pub use context::ExportContext;
pub use manifest::{import_into, import_manifest, ImportError, ImportedSite, Manifest};
pub use minify::{CssMinifier, HtmlMinifier, Minify};
pub use pipeline::{ExportError, ExportedSite, Exporter};
