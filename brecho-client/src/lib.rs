//! Brechó Client - inventory client core
//!
//! HTTP services for the Brechó backend plus the client-side logic of the
//! inventory screen: taxonomy navigation, debounced piece filtering with a
//! local fallback, piece selection and sales.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod logger;
pub mod navigation;
pub mod pricing;
pub mod selection;
pub mod session;

pub use api::{ApiClient, InventoryService, SalesService};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use filter::{FetchSource, FilterOutcome, InventoryBrowser, PieceFilter, PieceListState};
pub use http::{HttpClient, NetworkHttpClient};
pub use navigation::{CategoryPath, NavigationError, NavigationStack, TapOutcome, resolve_path};
pub use selection::{AddToSaleError, PieceSelection, QuantityError, SaleContext, add_to_sale};
pub use session::{AuthSession, SessionHandle};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo};
pub use shared::models::{FilterQuery, InventoryPiece, Sale, Taxonomy, TaxonomyNode};
