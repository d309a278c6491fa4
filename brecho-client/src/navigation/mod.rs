//! Taxonomy navigation: the drill-down stack and the path derived from it

mod resolver;
mod stack;

pub use resolver::{CategoryPath, resolve_path};
pub use stack::{NavigationError, NavigationStack, TapOutcome};
