//! # pagewright
//!
//! A bidirectional page compiler for a visual site builder.
//!
//! pagewright keeps three representations of the same page consistent: a
//! typed per-element style model with responsive overrides, the live markup
//! tree the editor renders, and the exported static HTML/CSS bundle.
//!
//! ## Core Systems
//!
//! - **[`css`]** - Typed styles, breakpoint cascade, composite-group resolution, declaration generation and reading
//! - **[`model`]** - Element, page and site records with structural validation
//! - **[`dom`]** - Slotmap-backed markup tree, queries and HTML serialization
//! - **[`compiler`]** - Forward compilation, reverse extraction, stylesheet synthesis
//! - **[`export`]** - Static-site export pipeline, manifest and import
//! - **[`store`]** - Collaborator traits for blobs, sites and notices
//! - **[`testing`]** - Shared fixtures

// Style engine
pub mod css;

// Records
pub mod model;

// Markup
pub mod dom;

// Compilation
pub mod compiler;

// Export and collaborators
pub mod export;
pub mod store;

// Test support
pub mod testing;
