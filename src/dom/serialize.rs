//! HTML serialization of a markup tree.
//!
//! Two modes: the editor form carries inline styles and behavior attributes
//! for the live editing surface; the export form carries only what a static
//! page needs, since its styles come from the synthesized stylesheets.

use std::fmt::Write;

use super::node::{MarkupNode, NodeId, NodeRole};
use super::tree::MarkupTree;

/// Which surface the HTML is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Editor,
    Export,
}

/// Serialization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    pub surface: Surface,
    /// Indent nested nodes by two spaces per level, one node per line.
    pub pretty: bool,
}

impl SerializeOptions {
    pub fn editor() -> Self {
        Self {
            surface: Surface::Editor,
            pretty: true,
        }
    }

    pub fn export(pretty: bool) -> Self {
        Self {
            surface: Surface::Export,
            pretty,
        }
    }
}

/// Escape text content.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attribute(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

/// Serialize the children of the root node (the page body content).
///
/// `depth` is the indentation level of the top-level nodes in pretty mode.
pub fn body_html(tree: &MarkupTree, options: SerializeOptions, depth: usize) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        for &child in tree.children(root) {
            write_node(tree, child, options, depth, &mut out);
        }
    }
    out
}

/// Serialize a node and its subtree.
pub fn node_html(tree: &MarkupTree, node: NodeId, options: SerializeOptions) -> String {
    let mut out = String::new();
    write_node(tree, node, options, 0, &mut out);
    out
}

fn attributes(node: &MarkupNode, surface: Surface) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    if let NodeRole::Element { id, kind } = &node.role {
        attrs.push(("id".to_owned(), id.clone()));
        if surface == Surface::Editor {
            attrs.push(("data-kind".to_owned(), kind.clone()));
        }
    }
    for (name, value) in &node.attributes {
        if surface == Surface::Export && name.starts_with("data-") {
            continue;
        }
        attrs.push((name.clone(), value.clone()));
    }
    if surface == Surface::Editor && node.role != NodeRole::Root {
        if !node.declarations.is_empty() {
            attrs.push(("style".to_owned(), node.declarations.to_inline()));
        }
        if node.flags.editable_text {
            attrs.push(("contenteditable".to_owned(), "true".to_owned()));
        }
        if !node.flags.draggable {
            attrs.push(("draggable".to_owned(), "false".to_owned()));
        }
        if node.flags.focusable {
            attrs.push(("tabindex".to_owned(), "0".to_owned()));
        }
        if !node.flags.accepts_children {
            attrs.push(("data-leaf".to_owned(), "true".to_owned()));
        }
    }
    attrs
}

fn write_node(
    tree: &MarkupTree,
    id: NodeId,
    options: SerializeOptions,
    depth: usize,
    out: &mut String,
) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let indent = if options.pretty {
        "  ".repeat(depth)
    } else {
        String::new()
    };

    out.push_str(&indent);
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in attributes(node, options.surface) {
        let _ = write!(out, " {}=\"{}\"", name, escape_attribute(&value));
    }
    out.push('>');

    if node.is_void() {
        if options.pretty {
            out.push('\n');
        }
        return;
    }

    let children = tree.children(id);
    if let Some(text) = &node.text {
        out.push_str(&escape_text(text));
    }
    if !children.is_empty() {
        if options.pretty {
            out.push('\n');
        }
        for &child in children {
            write_node(tree, child, options, depth + 1, out);
        }
        out.push_str(&indent);
    }
    let _ = write!(out, "</{}>", node.tag);
    if options.pretty {
        out.push('\n');
    }
}
