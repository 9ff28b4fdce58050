//! Style engine: typed style records, breakpoint cascade, composite-group
//! dependency resolution, declaration generation and value parsing.

pub mod scalar;
pub mod tokenizer;
pub mod styles;
pub mod breakpoint;
pub mod cascade;
pub mod declaration;
pub mod properties;
pub mod dependency;

pub use breakpoint::{Breakpoint, ResponsiveStyles};
pub use declaration::Declarations;
pub use dependency::DeclarationCache;
pub use properties::ValueError;
pub use styles::Style;
