//! Tree queries: by predicate, declaration snapshots and applied font families.

use std::collections::BTreeSet;

use super::node::{MarkupNode, NodeId};
use super::tree::MarkupTree;
use crate::css::dependency::DeclarationCache;
use crate::css::properties::font_stack;

/// Generic CSS families that never come from a webfont request.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "inherit",
];

impl MarkupTree {
    /// All nodes matching `predicate`, in tree order.
    pub fn query_all(&self, predicate: impl Fn(&MarkupNode) -> bool) -> Vec<NodeId> {
        self.pre_order()
            .into_iter()
            .filter(|&node| self.get(node).is_some_and(&predicate))
            .collect()
    }

    /// Element nodes in tree order.
    pub fn element_nodes(&self) -> Vec<NodeId> {
        self.query_all(|n| n.element_id().is_some())
    }

    /// Last-known declarations of every element node, keyed by element id.
    pub fn declaration_cache(&self) -> DeclarationCache {
        self.element_nodes()
            .into_iter()
            .filter_map(|node| self.get(node))
            .filter_map(|n| Some((n.element_id()?.to_owned(), n.declarations.clone())))
            .collect()
    }

    /// Every non-generic font family some node applies, at any breakpoint.
    pub fn applied_font_families(&self) -> BTreeSet<String> {
        let mut families = BTreeSet::new();
        for node in self.pre_order() {
            let Some(data) = self.get(node) else {
                continue;
            };
            let sets = std::iter::once(&data.declarations).chain(data.breakpoint_declarations.values());
            for decls in sets {
                if let Some(stack) = decls.get("font-family") {
                    families.extend(
                        font_stack(stack)
                            .into_iter()
                            .filter(|f| !GENERIC_FAMILIES.contains(&f.to_ascii_lowercase().as_str())),
                    );
                }
            }
        }
        families
    }
}
