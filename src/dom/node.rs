//! Node types: NodeId, MarkupNode, NodeRole, NodeFlags.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::css::breakpoint::Breakpoint;
use crate::css::declaration::Declarations;

new_key_type! {
    /// Unique identifier for a markup node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// What a node stands for in the element model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRole {
    /// The synthetic page root all sections hang off.
    Root,
    /// A compiled element.
    Element {
        /// Element id, also rendered as the `id` attribute.
        id: String,
        /// Semantic kind marker (`ElementKind::name`).
        kind: String,
    },
    /// Structural helper node that is not an element (e.g. a button's inner
    /// text wrapper).
    Wrapper,
}

/// Editor behavior flags derived from the element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFlags {
    /// Text content can be edited in place.
    pub editable_text: bool,
    /// Reachable by keyboard focus.
    pub focusable: bool,
    /// Other elements may be dropped into this node.
    pub accepts_children: bool,
    /// The node can be dragged around.
    pub draggable: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            editable_text: false,
            focusable: false,
            accepts_children: true,
            draggable: true,
        }
    }
}

/// Data associated with a single markup node.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupNode {
    /// HTML tag name.
    pub tag: String,
    pub role: NodeRole,
    /// Kind-specific attributes (`href`, `src`, `type`, ...), in insertion order.
    pub attributes: IndexMap<String, String>,
    /// Text content, rendered before any child nodes.
    pub text: Option<String>,
    /// Declarations for the breakpoint the tree was compiled at.
    pub declarations: Declarations,
    /// Full effective declarations for the base breakpoint and for every
    /// breakpoint the element overrides.
    pub breakpoint_declarations: BTreeMap<Breakpoint, Declarations>,
    pub flags: NodeFlags,
}

impl MarkupNode {
    /// Create a new node with the given tag and role.
    pub fn new(tag: impl Into<String>, role: NodeRole) -> Self {
        Self {
            tag: tag.into(),
            role,
            attributes: IndexMap::new(),
            text: None,
            declarations: Declarations::new(),
            breakpoint_declarations: BTreeMap::new(),
            flags: NodeFlags::default(),
        }
    }

    /// The synthetic page root.
    pub fn root() -> Self {
        Self::new("body", NodeRole::Root)
    }

    /// A non-element helper node.
    pub fn wrapper(tag: impl Into<String>) -> Self {
        Self::new(tag, NodeRole::Wrapper)
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set flags (builder).
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// Element id, if this node is a compiled element.
    pub fn element_id(&self) -> Option<&str> {
        match &self.role {
            NodeRole::Element { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Kind marker, if this node is a compiled element.
    pub fn kind(&self) -> Option<&str> {
        match &self.role {
            NodeRole::Element { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Void elements never have children or a closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self.tag.as_str(), "img" | "input" | "br" | "hr" | "meta" | "link")
    }
}
