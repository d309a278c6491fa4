//! Navigation stack over the category taxonomy
//!
//! `levels[0]` is always the taxonomy root; every following level is the
//! `children` level of a node in the level below it. The stack never
//! becomes empty.

use shared::models::{Level, Taxonomy, TaxonomyLeaf, TaxonomyNode};
use std::sync::Arc;
use thiserror::Error;

/// Navigation precondition violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot push an empty level")]
    EmptyLevel,
    #[error("level is not the children of any node in the current level")]
    NotAChildLevel,
    #[error("node {0} is not part of the current level")]
    NotInCurrentLevel(String),
}

/// Result of tapping a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The node had children; its level was pushed
    Drilled,
    /// Terminal node; it became the selected qualifier
    Qualified,
}

#[derive(Debug, Clone)]
pub struct NavigationStack {
    levels: Vec<Level>,
    selected_gender: Option<TaxonomyLeaf>,
}

impl NavigationStack {
    pub fn new(taxonomy: &Taxonomy) -> Self {
        Self {
            levels: vec![taxonomy.root().clone()],
            selected_gender: None,
        }
    }

    /// Push a children level. Clears any selected qualifier.
    pub fn push(&mut self, level: Level) -> Result<(), NavigationError> {
        if level.is_empty() {
            return Err(NavigationError::EmptyLevel);
        }
        let is_child = self
            .current_level()
            .iter()
            .any(|n| n.children().is_some_and(|c| Arc::ptr_eq(c, &level)));
        if !is_child {
            return Err(NavigationError::NotAChildLevel);
        }
        self.levels.push(level);
        self.selected_gender = None;
        Ok(())
    }

    /// Pop the top level. Returns `false` (and does nothing) at the root.
    pub fn pop(&mut self) -> bool {
        if self.levels.len() <= 1 {
            return false;
        }
        self.levels.pop();
        // the qualifier belonged to the level that was just left
        self.selected_gender = None;
        true
    }

    /// Tap a node of the current level
    pub fn tap(&mut self, node: &TaxonomyNode) -> Result<TapOutcome, NavigationError> {
        if !self.current_level().iter().any(|n| n.id() == node.id()) {
            return Err(NavigationError::NotInCurrentLevel(node.id().to_string()));
        }
        match node {
            TaxonomyNode::Category(category) if category.is_drillable() => {
                self.push(category.children.clone())?;
                Ok(TapOutcome::Drilled)
            }
            // empty category or leaf
            TaxonomyNode::Category(_) | TaxonomyNode::Leaf(_) => {
                self.selected_gender = Some(node.to_leaf());
                Ok(TapOutcome::Qualified)
            }
        }
    }

    /// Drop the selected qualifier, keeping the levels. Returns whether one was set.
    pub fn clear_gender(&mut self) -> bool {
        self.selected_gender.take().is_some()
    }

    /// Back to `[root]` with no qualifier
    pub fn reset(&mut self) {
        self.levels.truncate(1);
        self.selected_gender = None;
    }

    pub fn current_level(&self) -> &Level {
        // never empty
        &self.levels[self.levels.len() - 1]
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of levels, at least 1
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.levels.len() == 1
    }

    pub fn selected_gender(&self) -> Option<&TaxonomyLeaf> {
        self.selected_gender.as_ref()
    }
}
