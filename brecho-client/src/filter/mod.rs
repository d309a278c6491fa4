//! Piece filtering: debounce, server query with client-side fallback and
//! the inventory screen controller built on top of it

mod browser;
mod debounce;
mod orchestrator;
pub mod search;

pub use browser::InventoryBrowser;
pub use debounce::Debouncer;
pub use orchestrator::{FetchSource, FilterOutcome, PieceFilter, PieceListState};
pub use search::{filter_by_search, filter_fallback};
