//! Inventory and sales services
//!
//! The services are traits so screens can be driven by the HTTP
//! implementation ([`ApiClient`]) or by in-memory fakes in tests.

mod client;
mod inventory;
mod sales;

pub use client::ApiClient;
pub use inventory::InventoryService;
pub use sales::SalesService;

/// Route constants
pub(crate) mod routes {
    pub const LOGIN: &str = "auth/login";
    pub const PIECES: &str = "pieces";
    pub const PIECES_FILTER: &str = "pieces/filter";
    pub const SALES: &str = "sales";

    pub fn piece(id: &str) -> String {
        format!("{PIECES}/{id}")
    }

    pub fn sale_pieces(sale_id: &str) -> String {
        format!("{SALES}/{sale_id}/pieces")
    }

    pub fn sale_confirm_payment(sale_id: &str) -> String {
        format!("{SALES}/{sale_id}/confirm-payment")
    }

    pub fn sale_shipping(sale_id: &str) -> String {
        format!("{SALES}/{sale_id}/shipping")
    }
}
