//! Reverse extraction: markup tree → element records.
//!
//! Inverse of [`forward`](super::forward) up to value normalization: colors
//! come back as lowercase hex, font stacks lose their quoting and fallbacks,
//! a `position: relative` implied by `z-index` reads back as unset, partial
//! transforms come back completed with identity values.

use thiserror::Error;
use tracing::warn;

use super::forward::{BLOB_ID_ATTRIBUTE, BLOB_SCHEME};
use crate::css::breakpoint::{Breakpoint, ResponsiveStyles};
use crate::css::cascade;
use crate::css::properties::{style_from_declarations, style_from_declarations_over};
use crate::css::styles::Style;
use crate::dom::node::{MarkupNode, NodeId, NodeRole};
use crate::dom::tree::MarkupTree;
use crate::model::element::{Element, ElementKind, ImageSource, InputType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("node is not a compiled element")]
    NotAnElement,

    #[error("element {element}: unknown kind marker {kind:?}")]
    UnknownKind { element: String, kind: String },

    #[error("element {element}: missing attribute {attribute}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("element {element}: invalid {attribute} value {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },
}

/// Extract the element compiled into `node`, with its element descendants
/// nested in `children`.
pub fn extract(tree: &MarkupTree, node: NodeId) -> Result<Element, ExtractError> {
    let data = tree.get(node).ok_or(ExtractError::NotAnElement)?;
    let NodeRole::Element { id, kind } = &data.role else {
        return Err(ExtractError::NotAnElement);
    };

    let mut element = Element::new(id.as_str(), extract_kind(data, id, kind)?);
    element.parent_id = tree
        .parent(node)
        .and_then(|p| tree.get(p))
        .and_then(MarkupNode::element_id)
        .map(str::to_owned);
    element.content = match element.kind {
        ElementKind::Button { .. } => label_text(tree, node),
        ElementKind::Image { .. } | ElementKind::Input { .. } => None,
        _ => data.text.clone(),
    };
    let (style, responsive) = extract_styles(data);
    element.style = style;
    element.responsive = responsive;

    for &child in tree.children(node) {
        if tree.get(child).and_then(MarkupNode::element_id).is_some() {
            element.children.push(extract(tree, child)?);
        }
    }
    Ok(element)
}

/// Extract every top-level element of the tree (nested form).
pub fn extract_all(tree: &MarkupTree) -> Result<Vec<Element>, ExtractError> {
    let Some(root) = tree.root() else {
        return Ok(Vec::new());
    };
    tree.children(root)
        .iter()
        .filter(|&&c| tree.get(c).and_then(MarkupNode::element_id).is_some())
        .map(|&c| extract(tree, c))
        .collect()
}

/// Base style plus minimal overrides rebuilt from the per-breakpoint
/// declaration sets.
fn extract_styles(node: &MarkupNode) -> (Style, ResponsiveStyles) {
    let base_decls = node
        .breakpoint_declarations
        .get(&Breakpoint::Monitor)
        .unwrap_or(&node.declarations);
    let base = style_from_declarations(base_decls);

    let mut responsive = ResponsiveStyles::new();
    for bp in Breakpoint::RESPONSIVE {
        let Some(decls) = node.breakpoint_declarations.get(&bp) else {
            continue;
        };
        let inherited = cascade::resolve(&base, &responsive, bp, false);
        let layer = style_from_declarations_over(decls, inherited.position).diff(&inherited);
        if !layer.is_empty() {
            responsive.insert(bp, layer);
        }
    }
    (base, responsive)
}

fn extract_kind(data: &MarkupNode, id: &str, kind: &str) -> Result<ElementKind, ExtractError> {
    let required = |attribute: &'static str| {
        data.attribute(attribute)
            .map(str::to_owned)
            .ok_or_else(|| ExtractError::MissingAttribute {
                element: id.to_owned(),
                attribute,
            })
    };
    let optional = |attribute: &str| data.attribute(attribute).map(str::to_owned);

    let kind = match kind {
        "section" => ElementKind::Section,
        "container" => ElementKind::Container,
        "grid" => ElementKind::Grid,
        "text" => ElementKind::Text,
        "heading" => ElementKind::Heading {
            level: heading_level(&data.tag).ok_or_else(|| ExtractError::InvalidAttribute {
                element: id.to_owned(),
                attribute: "tag",
                value: data.tag.clone(),
            })?,
        },
        "button" => ElementKind::Button {
            href: optional("href"),
        },
        "link" => ElementKind::Link {
            href: required("href")?,
        },
        "image" => {
            let source = match data.attribute(BLOB_ID_ATTRIBUTE) {
                Some(blob) => ImageSource::Blob(blob.to_owned()),
                None => {
                    let src = required("src")?;
                    match src.strip_prefix(BLOB_SCHEME) {
                        Some(blob) => ImageSource::Blob(blob.to_owned()),
                        None => ImageSource::Url(src),
                    }
                }
            };
            ElementKind::Image {
                source,
                alt: optional("alt"),
            }
        }
        "input" => {
            let raw = required("type")?;
            let input_type = match InputType::parse(&raw) {
                Some(t) => t,
                None => {
                    warn!(element = id, value = %raw, "unknown input type, reading as text");
                    InputType::Text
                }
            };
            ElementKind::Input {
                input_type,
                placeholder: optional("placeholder"),
                autocomplete: data.attribute("autocomplete") == Some("on"),
            }
        }
        other => {
            return Err(ExtractError::UnknownKind {
                element: id.to_owned(),
                kind: other.to_owned(),
            })
        }
    };
    Ok(kind)
}

fn heading_level(tag: &str) -> Option<u8> {
    let level: u8 = tag.strip_prefix('h')?.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn label_text(tree: &MarkupTree, node: NodeId) -> Option<String> {
    tree.children(node)
        .iter()
        .filter_map(|&c| tree.get(c))
        .find(|n| n.role == NodeRole::Wrapper)
        .and_then(|n| n.text.clone())
}
