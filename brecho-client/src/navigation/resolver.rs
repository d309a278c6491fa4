//! Category path resolution
//!
//! The selected path is not stored; it is derived from the navigation stack
//! by finding, for each pair of adjacent levels, the node of the shallower
//! level whose `children` *is* the deeper level.

use super::NavigationStack;
use shared::models::{FilterQuery, TaxonomyNode};
use std::sync::Arc;

/// Ordered chain of selected nodes, root side first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPath {
    nodes: Vec<TaxonomyNode>,
    qualified: bool,
}

impl CategoryPath {
    pub fn nodes(&self) -> &[TaxonomyNode] {
        &self.nodes
    }

    pub fn ids(&self) -> Vec<&str> {
        self.nodes.iter().map(TaxonomyNode::id).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(TaxonomyNode::name).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn last(&self) -> Option<&TaxonomyNode> {
        self.nodes.last()
    }

    /// Breadcrumb label, e.g. `Camisas › Camiseta`
    pub fn breadcrumb(&self) -> String {
        self.names().join(" › ")
    }

    /// The last node is the selected qualifier
    pub fn is_qualified(&self) -> bool {
        self.qualified
    }

    /// Filter query for this path plus free-text search
    pub fn to_filter_query(&self, search: &str) -> FilterQuery {
        let query = FilterQuery::from_path(self.ids(), search);
        if self.qualified {
            query.with_qualifier()
        } else {
            query
        }
    }
}

/// Derive the selected path from the stack and the selected qualifier.
///
/// Pure and idempotent. Without a qualifier the path has exactly
/// `stack.depth() - 1` nodes.
pub fn resolve_path(stack: &NavigationStack) -> CategoryPath {
    let levels = stack.levels();
    let mut nodes = Vec::with_capacity(levels.len());

    for (depth, pair) in levels.windows(2).enumerate() {
        let (parent, child) = (&pair[0], &pair[1]);
        let link = parent
            .iter()
            .find(|n| n.children().is_some_and(|c| Arc::ptr_eq(c, child)));
        match link {
            Some(node) => nodes.push(node.clone()),
            None => {
                debug_assert!(false, "navigation level {} has no parent node", depth + 1);
                tracing::error!(depth = depth + 1, "Navigation level has no parent node, skipping");
            }
        }
    }

    let mut qualified = false;
    if let Some(gender) = stack.selected_gender() {
        let already_last = nodes.last().is_some_and(|n| n.id() == gender.id);
        if already_last {
            qualified = true;
        } else if let Some(node) = stack.current_level().iter().find(|n| n.id() == gender.id) {
            nodes.push(node.clone());
            qualified = true;
        }
    }

    CategoryPath { nodes, qualified }
}
