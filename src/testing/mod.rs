//! Shared fixtures for unit and integration tests.
//!
//! A small two-page site exercising every composite group, responsive
//! overrides, a blob image and a webfont, plus the collaborators an export
//! run needs.

pub mod fixtures;

pub use fixtures::{blob_store, export_config, favicon_fetcher, sample_site};
