//! Data models
//!
//! Shared between the client core and the mock API (via JSON, camelCase).

pub mod filter;
pub mod piece;
pub mod sale;
pub mod taxonomy;

// Re-exports
pub use filter::*;
pub use piece::*;
pub use sale::*;
pub use taxonomy::*;
