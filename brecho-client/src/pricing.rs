//! Piece pricing
//!
//! Pieces are registered without a price and priced later from their own
//! screen. Prices are typed the Brazilian way (`R$ 12,50`).

use crate::ClientError;
use crate::api::InventoryService;
use rust_decimal::Decimal;
use shared::models::InventoryPiece;
use std::str::FromStr;
use thiserror::Error;

/// Highest accepted price, in reais
pub const MAX_PRICE: Decimal = Decimal::from_parts(9_999_999, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price is required")]
    Missing,
    #[error("not a valid price: {0}")]
    NotANumber(String),
    #[error("price must be greater than zero")]
    NotPositive,
    #[error("price can have at most two decimal places")]
    TooManyDecimals,
    #[error("price cannot exceed {max}")]
    TooHigh { max: Decimal },
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error(transparent)]
    Invalid(#[from] PriceError),
    #[error("price update rejected: {0}")]
    Rejected(#[source] ClientError),
}

/// Parse a typed price.
///
/// Accepts `12,50`, `12.50`, `R$ 12,50` and `1.234,56` (dot as thousands
/// separator when a comma is present).
pub fn parse_price(input: &str) -> Result<Decimal, PriceError> {
    let raw = input.trim();
    let raw = raw.strip_prefix("R$").unwrap_or(raw).trim();
    if raw.is_empty() {
        return Err(PriceError::Missing);
    }

    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    let price =
        Decimal::from_str(&normalized).map_err(|_| PriceError::NotANumber(input.trim().to_string()))?;

    if price <= Decimal::ZERO {
        return Err(PriceError::NotPositive);
    }
    if price.normalize().scale() > 2 {
        return Err(PriceError::TooManyDecimals);
    }
    if price > MAX_PRICE {
        return Err(PriceError::TooHigh { max: MAX_PRICE });
    }
    Ok(price.round_dp(2))
}

/// Pieces still waiting for a price, in list order
pub fn pending_pricing(pieces: &[InventoryPiece]) -> Vec<&InventoryPiece> {
    pieces.iter().filter(|p| !p.is_priced()).collect()
}

/// Validate `input` and update the price of `piece_id`.
/// An invalid price issues no request.
pub async fn apply_price<S: InventoryService + ?Sized>(
    service: &S,
    piece_id: &str,
    input: &str,
) -> Result<InventoryPiece, PricingError> {
    let price = parse_price(input)?;
    let piece = service.update_price(piece_id, price).await.map_err(|e| {
        tracing::warn!(piece_id, %price, error = %e, "Price update failed");
        PricingError::Rejected(e)
    })?;
    crate::audit_log!(
        "set_price",
        format!("piece:{piece_id}"),
        price
    );
    Ok(piece)
}
