//! Sale Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sale lifecycle
///
/// Shipping value can only change while the sale is open; confirming the
/// payment closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    #[default]
    Open,
    PaymentConfirmed,
}

impl SaleStatus {
    pub fn can_transition_to(self, next: SaleStatus) -> bool {
        matches!((self, next), (SaleStatus::Open, SaleStatus::PaymentConfirmed))
    }

    pub fn is_open(self) -> bool {
        self == SaleStatus::Open
    }
}

/// Sale entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub client_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: SaleStatus,
    #[serde(default)]
    pub shipping_value: Option<Decimal>,
    #[serde(default)]
    pub pieces: Vec<SalePiece>,
    /// Unix millis
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl Sale {
    /// Units of `piece_id` already attached to this sale
    pub fn quantity_of(&self, piece_id: &str) -> u32 {
        self.pieces
            .iter()
            .filter(|p| p.piece_id == piece_id)
            .map(|p| p.quantity)
            .sum()
    }
}

/// Piece attached to a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePiece {
    pub piece_id: String,
    pub quantity: u32,
}

/// Create sale payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreate {
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Add piece to sale payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePieceAdd {
    pub piece_id: String,
    pub quantity: u32,
}

/// Shipping value payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingValueUpdate {
    pub shipping_value: Decimal,
}
