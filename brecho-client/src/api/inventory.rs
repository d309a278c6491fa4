use crate::ClientResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{FilterQuery, InventoryPiece, PieceCreate};

/// Inventory query service
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// `GET /pieces/filter` - server-side category + search filtering
    async fn filter_pieces(&self, query: &FilterQuery) -> ClientResult<Vec<InventoryPiece>>;

    /// `GET /pieces` - every piece in stock
    async fn list_pieces(&self) -> ClientResult<Vec<InventoryPiece>>;

    /// `POST /pieces`
    async fn create_piece(&self, piece: &PieceCreate) -> ClientResult<InventoryPiece>;

    /// `PATCH /pieces/:id`
    async fn update_price(&self, piece_id: &str, price: Decimal) -> ClientResult<InventoryPiece>;
}
