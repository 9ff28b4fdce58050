//! Element, page and site records plus structural validation.

pub mod element;
pub mod page;
pub mod validate;

pub use element::{Element, ElementKind, ImageSource, InputType};
pub use page::{slugify, Page, Site};
pub use validate::{validate_page, validate_site, ValidationError};
