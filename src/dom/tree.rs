//! The markup arena: one synthetic root, element nodes and wrappers below it.

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{MarkupNode, NodeId};

/// A compiled page as a tree of markup nodes.
///
/// Nodes live in a `SlotMap`; structure lives in secondary maps, so child
/// order is insertion order. Element nodes are also indexed by element id.
#[derive(Debug, Clone, Default)]
pub struct MarkupTree {
    nodes: SlotMap<NodeId, MarkupNode>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    by_element: HashMap<String, NodeId>,
    root: Option<NodeId>,
}

impl MarkupTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the page root. A second call replaces the root pointer; the old
    /// root and its subtree stay in the arena but are no longer reachable.
    pub fn insert_root(&mut self, data: MarkupNode) -> NodeId {
        let id = self.add(data);
        self.root = Some(id);
        id
    }

    /// Append `data` as the last child of `parent`.
    ///
    /// A stale `parent` leaves the node detached; it is still stored and can
    /// be looked up, but no walk from the root reaches it.
    pub fn insert_child(&mut self, parent: NodeId, data: MarkupNode) -> NodeId {
        let id = self.add(data);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
            self.parent.insert(id, parent);
        }
        id
    }

    fn add(&mut self, data: MarkupNode) -> NodeId {
        let element_id = data.element_id().map(str::to_owned);
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if let Some(element_id) = element_id {
            self.by_element.entry(element_id).or_insert(id);
        }
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, id: NodeId) -> Option<&MarkupNode> {
        self.nodes.get(id)
    }

    /// Mutable node access. The element id of a node is fixed at insertion;
    /// changing its role here does not re-index it.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut MarkupNode> {
        self.nodes.get_mut(id)
    }

    /// The node compiled from element `id`. The first node inserted for an id
    /// wins.
    pub fn node_for_element(&self, id: &str) -> Option<NodeId> {
        self.by_element.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes reachable from the root, parents before children, siblings in
    /// order.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }
}
