//! Shared types for the Brechó inventory client
//!
//! Wire models used by both the client core and the mock API server:
//! category taxonomy, inventory pieces, sales, filter queries, response
//! envelopes and error codes.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{ApiErrorBody, ErrorCode};
pub use models::{
    CategoryNode, FilterQuery, InventoryPiece, Level, Sale, SaleStatus, Taxonomy, TaxonomyLeaf,
    TaxonomyNode,
};
pub use response::DataResponse;
pub use rust_decimal::Decimal;
