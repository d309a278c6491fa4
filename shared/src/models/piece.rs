//! Inventory Piece Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A physical piece in stock, as returned by the inventory API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPiece {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Units available
    #[serde(default)]
    pub quantity: u32,
    /// Selling price, absent until the piece has been priced
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub subcategory_id: Option<String>,
}

impl InventoryPiece {
    /// Case-insensitive substring match against the name or the description.
    /// An empty (or blank) term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    pub fn is_priced(&self) -> bool {
        self.price.is_some_and(|p| p > Decimal::ZERO)
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Create piece payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceCreate {
    /// Taxonomy ids from the category down to the qualifier
    pub category_path: Vec<String>,
    pub description: String,
    pub quantity: u32,
}

/// Update price payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecePriceUpdate {
    pub price: Decimal,
}
