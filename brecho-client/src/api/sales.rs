use crate::ClientResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{Sale, SaleCreate, SalePieceAdd};

/// Sales service
#[async_trait]
pub trait SalesService: Send + Sync {
    /// `POST /sales`
    async fn create_sale(&self, sale: &SaleCreate) -> ClientResult<Sale>;

    /// `POST /sales/:id/pieces`
    async fn add_piece_to_sale(&self, sale_id: &str, item: &SalePieceAdd) -> ClientResult<Sale>;

    /// `PATCH /sales/:id/confirm-payment`
    async fn confirm_payment(&self, sale_id: &str) -> ClientResult<Sale>;

    /// `PATCH /sales/:id/shipping`
    async fn set_shipping_value(&self, sale_id: &str, value: Decimal) -> ClientResult<Sale>;
}
