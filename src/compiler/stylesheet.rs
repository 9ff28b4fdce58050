//! Page stylesheet synthesis.
//!
//! The base sheet holds one `#id` rule per styled element. The responsive
//! sheet holds one `@media (max-width: N)` block per overridden breakpoint,
//! widest first, with only the declarations that differ from the element's
//! base declarations.

use std::fmt::Write;

use crate::compiler::forward::declarations_at;
use crate::css::breakpoint::Breakpoint;
use crate::css::declaration::Declarations;
use crate::model::element::Element;
use crate::model::page::Page;

/// The two stylesheets of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStylesheets {
    /// `{pageId}_index.css`
    pub base: String,
    /// `{pageId}_responsive.css`
    pub responsive: String,
}

/// Synthesize both stylesheets for `page`.
pub fn synthesize(page: &Page) -> PageStylesheets {
    let elements: Vec<&Element> = page.elements.values().collect();
    let base: Vec<(&Element, Declarations)> = elements
        .iter()
        .map(|&e| (e, declarations_at(e, Breakpoint::Monitor, None)))
        .collect();

    let base_sheet = base
        .iter()
        .filter(|(_, decls)| !decls.is_empty())
        .map(|(e, decls)| rule(&e.id, decls, 0))
        .collect::<Vec<_>>()
        .join("\n");

    let present = page.responsive_breakpoints();
    let mut blocks = Vec::new();
    for bp in Breakpoint::RESPONSIVE {
        let Some(width) = bp.max_width() else {
            continue;
        };
        if !present.contains(&bp) {
            continue;
        }
        let rules: Vec<String> = base
            .iter()
            .filter(|(e, _)| e.responsive.contains_key(&bp))
            .map(|(e, base_decls)| (e, declarations_at(e, bp, None).diff(base_decls)))
            .filter(|(_, changed)| !changed.is_empty())
            .map(|(e, changed)| rule(&e.id, &changed, 1))
            .collect();
        if rules.is_empty() {
            continue;
        }
        blocks.push(format!(
            "@media (max-width: {width}px) {{\n{}}}\n",
            rules.join("\n")
        ));
    }

    PageStylesheets {
        base: base_sheet,
        responsive: blocks.join("\n"),
    }
}

/// `#id { ... }` at `depth` levels of two-space indentation.
fn rule(id: &str, decls: &Declarations, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut out = format!("{indent}#{} {{\n", escape_identifier(id));
    for (property, value) in decls.iter() {
        let _ = writeln!(out, "{indent}  {property}: {value};");
    }
    let _ = writeln!(out, "{indent}}}");
    out
}

/// Escape `id` for use in an `#id` selector, following CSSOM `CSS.escape`.
pub fn escape_identifier(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let starts_with_dash = id.starts_with('-');
    for (i, c) in id.chars().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => {
                let _ = write!(out, "\\{:x} ", c as u32);
            }
            '0'..='9' if i == 0 || (i == 1 && starts_with_dash) => {
                let _ = write!(out, "\\{:x} ", c as u32);
            }
            '-' if i == 0 && id.len() == 1 => out.push_str("\\-"),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}
