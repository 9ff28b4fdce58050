//! Forward compilation: element records → markup tree.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::css::breakpoint::Breakpoint;
use crate::css::declaration::{generate, Declarations};
use crate::css::dependency::{self, DeclarationCache, StyleSource};
use crate::dom::node::{MarkupNode, NodeFlags, NodeId, NodeRole};
use crate::dom::tree::MarkupTree;
use crate::model::element::{Element, ElementKind, ImageSource};
use crate::model::page::Page;

/// Attribute carrying the blob id of an image whose `src` is a blob reference.
pub const BLOB_ID_ATTRIBUTE: &str = "data-blob-id";

/// Scheme prefix used for unresolved blob image sources.
pub const BLOB_SCHEME: &str = "blob:";

/// Tag of the inner node holding a button's text.
pub const BUTTON_LABEL_TAG: &str = "span";

/// Compile `elements` into a markup tree with declarations for `breakpoint`.
pub fn compile<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    breakpoint: Breakpoint,
) -> MarkupTree {
    Compiler::new(elements, breakpoint, None).run()
}

/// Like [`compile`], reading the current value of partially updated
/// composite groups from `cache` first.
pub fn compile_with_cache<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    breakpoint: Breakpoint,
    cache: &DeclarationCache,
) -> MarkupTree {
    Compiler::new(elements, breakpoint, Some(cache)).run()
}

/// Compile every element of `page`.
pub fn compile_page(page: &Page, breakpoint: Breakpoint) -> MarkupTree {
    compile(page.elements.values(), breakpoint)
}

/// Declarations of `element` at `breakpoint`: cascade, then composite-group
/// completion, then generation.
pub fn declarations_at(
    element: &Element,
    breakpoint: Breakpoint,
    compiled: Option<&Declarations>,
) -> Declarations {
    let effective = element.resolved_style(breakpoint);
    let source = StyleSource::from_model(&effective).with_compiled(compiled);
    generate(&dependency::resolve(&effective, &source))
}

/// Editor behavior flags of a kind.
pub fn flags_for(kind: &ElementKind) -> NodeFlags {
    let accepts_children = kind.accepts_children();
    match kind {
        ElementKind::Section => NodeFlags {
            draggable: false,
            ..NodeFlags::default()
        },
        ElementKind::Container | ElementKind::Grid => NodeFlags::default(),
        ElementKind::Heading { .. } | ElementKind::Text => NodeFlags {
            editable_text: true,
            accepts_children,
            ..NodeFlags::default()
        },
        ElementKind::Button { .. } | ElementKind::Link { .. } => NodeFlags {
            editable_text: true,
            focusable: true,
            accepts_children,
            ..NodeFlags::default()
        },
        ElementKind::Image { .. } => NodeFlags {
            accepts_children,
            ..NodeFlags::default()
        },
        ElementKind::Input { .. } => NodeFlags {
            focusable: true,
            accepts_children,
            ..NodeFlags::default()
        },
    }
}

struct Compiler<'a, 'c> {
    breakpoint: Breakpoint,
    cache: Option<&'c DeclarationCache>,
    order: Vec<&'a Element>,
    top_level: Vec<&'a Element>,
    buckets: HashMap<&'a str, Vec<&'a Element>>,
    built: HashSet<&'a str>,
    tree: MarkupTree,
}

impl<'a, 'c> Compiler<'a, 'c> {
    fn new(
        elements: impl IntoIterator<Item = &'a Element>,
        breakpoint: Breakpoint,
        cache: Option<&'c DeclarationCache>,
    ) -> Self {
        let order: Vec<&'a Element> = elements.into_iter().collect();
        let containers: HashMap<&str, &Element> = order
            .iter()
            .filter(|e| e.kind.accepts_children())
            .map(|e| (e.id.as_str(), *e))
            .collect();

        let mut top_level = Vec::new();
        let mut buckets: HashMap<&'a str, Vec<&'a Element>> = HashMap::new();
        for &element in &order {
            let parent = match (&element.kind, element.parent_id.as_deref()) {
                (ElementKind::Section, _) | (_, None) => None,
                (_, Some(parent)) if parent != element.id && containers.contains_key(parent) => {
                    Some(parent)
                }
                (_, Some(parent)) => {
                    warn!(element = %element.id, parent, "parent not found, attaching to root");
                    None
                }
            };
            match parent {
                Some(parent) => buckets.entry(parent).or_default().push(element),
                None => top_level.push(element),
            }
        }

        Self {
            breakpoint,
            cache,
            order,
            top_level,
            buckets,
            built: HashSet::new(),
            tree: MarkupTree::new(),
        }
    }

    fn run(mut self) -> MarkupTree {
        let root = self.tree.insert_root(MarkupNode::root());
        for element in std::mem::take(&mut self.top_level) {
            self.build(root, element);
        }
        // Elements caught in a parent cycle are unreachable from the root.
        let order = std::mem::take(&mut self.order);
        for element in order {
            if !self.built.contains(element.id.as_str()) {
                warn!(element = %element.id, "element unreachable from root, attaching to root");
                self.build(root, element);
            }
        }
        debug!(nodes = self.tree.len(), breakpoint = %self.breakpoint, "compiled markup tree");
        self.tree
    }

    fn build(&mut self, parent: NodeId, element: &'a Element) {
        if !self.built.insert(element.id.as_str()) {
            return;
        }
        let data = self.node_for(element);
        let node = self.tree.insert_child(parent, data);
        if let ElementKind::Button { .. } = element.kind {
            let mut label = MarkupNode::wrapper(BUTTON_LABEL_TAG);
            label.text = element.content.clone();
            self.tree.insert_child(node, label);
        }
        let children = self.buckets.remove(element.id.as_str()).unwrap_or_default();
        for child in children {
            self.build(node, child);
        }
    }

    fn node_for(&self, element: &Element) -> MarkupNode {
        let mut node = MarkupNode::new(
            element.kind.tag(),
            NodeRole::Element {
                id: element.id.clone(),
                kind: element.kind.name().to_owned(),
            },
        )
        .with_flags(flags_for(&element.kind));

        let compiled = self.cache.and_then(|c| c.get(&element.id));
        node.declarations = declarations_at(element, self.breakpoint, compiled);
        node.breakpoint_declarations.insert(
            Breakpoint::Monitor,
            declarations_at(element, Breakpoint::Monitor, None),
        );
        for &bp in element.responsive.keys() {
            node.breakpoint_declarations
                .insert(bp, declarations_at(element, bp, None));
        }

        match &element.kind {
            ElementKind::Button { href } => {
                if let Some(href) = href {
                    node.set_attribute("href", href.as_str());
                }
            }
            ElementKind::Link { href } => {
                node.set_attribute("href", href.as_str());
                node.text = element.content.clone();
            }
            ElementKind::Image { source, alt } => {
                match source {
                    ImageSource::Url(url) => node.set_attribute("src", url.as_str()),
                    ImageSource::Blob(id) => {
                        node.set_attribute("src", format!("{BLOB_SCHEME}{id}"));
                        node.set_attribute(BLOB_ID_ATTRIBUTE, id.as_str());
                    }
                }
                if let Some(alt) = alt {
                    node.set_attribute("alt", alt.as_str());
                }
            }
            ElementKind::Input {
                input_type,
                placeholder,
                autocomplete,
            } => {
                node.set_attribute("type", input_type.as_str());
                if let Some(placeholder) = placeholder {
                    node.set_attribute("placeholder", placeholder.as_str());
                }
                node.set_attribute("autocomplete", if *autocomplete { "on" } else { "off" });
            }
            ElementKind::Section
            | ElementKind::Container
            | ElementKind::Grid
            | ElementKind::Heading { .. }
            | ElementKind::Text => node.text = element.content.clone(),
        }
        node
    }
}
