//! Bidirectional compiler between element records and markup, plus the
//! per-page stylesheet synthesizer.

pub mod forward;
pub mod reverse;
pub mod stylesheet;

pub use forward::{compile, compile_page, compile_with_cache};
pub use reverse::{extract, extract_all, ExtractError};
pub use stylesheet::{synthesize, PageStylesheets};
