//! Piece selection, detail view and add-to-sale
//!
//! Quantity input is validated against the piece's stock before anything
//! is sent. A server rejection leaves the selection and the piece untouched.

use crate::ClientError;
use crate::api::SalesService;
use shared::models::{InventoryPiece, Sale, SalePieceAdd};
use thiserror::Error;

/// Selected piece ids in tap order, plus the piece shown in detail
#[derive(Debug, Clone, Default)]
pub struct PieceSelection {
    selected: Vec<String>,
    detail: Option<InventoryPiece>,
}

impl PieceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `id` in or out. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop every selection and close the detail view
    pub fn clear(&mut self) {
        self.selected.clear();
        self.detail = None;
    }

    pub fn open_detail(&mut self, piece: InventoryPiece) {
        self.detail = Some(piece);
    }

    pub fn detail(&self) -> Option<&InventoryPiece> {
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) -> Option<InventoryPiece> {
        self.detail.take()
    }
}

/// Sale the picked pieces are attached to, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleContext {
    pub sale_id: Option<String>,
}

impl SaleContext {
    pub fn browsing() -> Self {
        Self::default()
    }

    pub fn for_sale(sale_id: impl Into<String>) -> Self {
        Self {
            sale_id: Some(sale_id.into()),
        }
    }

    /// The detail view offers "add to sale" only inside a sale
    pub fn can_add_to_sale(&self) -> bool {
        self.sale_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is required")]
    Missing,
    #[error("quantity must be a whole number: {0}")]
    NotANumber(String),
    #[error("quantity must be greater than zero")]
    NotPositive,
    #[error("only {available} in stock, requested {requested}")]
    ExceedsStock { requested: u32, available: u32 },
}

/// Parse the quantity typed in the detail view
pub fn parse_quantity(input: &str, available: u32) -> Result<u32, QuantityError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(QuantityError::Missing);
    }
    let value: i64 = input
        .parse()
        .map_err(|_| QuantityError::NotANumber(input.to_string()))?;
    if value <= 0 {
        return Err(QuantityError::NotPositive);
    }
    let requested = u32::try_from(value).unwrap_or(u32::MAX);
    if requested > available {
        return Err(QuantityError::ExceedsStock {
            requested,
            available,
        });
    }
    Ok(requested)
}

#[derive(Debug, Error)]
pub enum AddToSaleError {
    #[error("no sale in progress")]
    NoActiveSale,
    #[error(transparent)]
    InvalidQuantity(#[from] QuantityError),
    #[error("sale rejected the piece: {0}")]
    Rejected(#[source] ClientError),
}

/// Attach `piece` to the sale in `ctx` with the quantity typed in `input`.
///
/// Nothing is sent unless there is a sale and the quantity is valid.
pub async fn add_to_sale<S: SalesService + ?Sized>(
    service: &S,
    ctx: &SaleContext,
    piece: &InventoryPiece,
    input: &str,
) -> Result<Sale, AddToSaleError> {
    let sale_id = ctx.sale_id.as_deref().ok_or(AddToSaleError::NoActiveSale)?;
    let quantity = parse_quantity(input, piece.quantity)?;

    let item = SalePieceAdd {
        piece_id: piece.id.clone(),
        quantity,
    };
    match service.add_piece_to_sale(sale_id, &item).await {
        Ok(sale) => {
            crate::audit_log!(
                "add_piece",
                format!("sale:{sale_id}"),
                format!("piece:{} x{quantity}", piece.id)
            );
            Ok(sale)
        }
        Err(e) => {
            tracing::warn!(sale_id, piece_id = %piece.id, error = %e, "Add to sale rejected");
            Err(AddToSaleError::Rejected(e))
        }
    }
}
