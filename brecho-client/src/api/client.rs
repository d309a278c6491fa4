// brecho-client/src/api/client.rs
// HTTP implementation of the inventory and sales services

use super::routes;
use super::{InventoryService, SalesService};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::{AuthSession, SessionHandle};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::DataResponse;
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::models::{
    FilterQuery, InventoryPiece, PieceCreate, PiecePriceUpdate, Sale, SaleCreate, SalePieceAdd,
    ShippingValueUpdate, Taxonomy,
};

/// Client for the Brechó inventory/sales API
#[derive(Debug, Clone)]
pub struct ApiClient<H = NetworkHttpClient> {
    http: H,
}

impl ApiClient<NetworkHttpClient> {
    /// Network client with a fresh session (signed in when the config carries a token)
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(config, SessionHandle::new())?;
        Ok(Self::new(http))
    }
}

impl<H: HttpClient> ApiClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn session(&self) -> &SessionHandle {
        self.http.session()
    }

    fn require_session(&self) -> ClientResult<()> {
        if self.session().is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::Unauthorized("no active session".into()))
        }
    }

    /// Login and store the token in the session
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: DataResponse<LoginResponse> = self.http.post(routes::LOGIN, &req).await?;
        let LoginResponse { token, user } = resp.into_inner();
        if token.is_empty() {
            return Err(ClientError::InvalidResponse("Missing login token".into()));
        }
        self.session().sign_in(token, Some(user.clone()));
        tracing::info!(user = %user.username, "Signed in");
        Ok(user)
    }

    /// Drop the local session
    pub fn logout(&self) {
        self.session().sign_out();
        tracing::info!("Signed out");
    }

    /// Register a new piece under the taxonomy node `node_id`.
    ///
    /// The category path sent to the API is the chain of ids from the root
    /// down to `node_id`.
    pub async fn create_piece_at(
        &self,
        taxonomy: &Taxonomy,
        node_id: &str,
        description: &str,
        quantity: u32,
    ) -> ClientResult<InventoryPiece> {
        let path = taxonomy
            .path_to(node_id)
            .ok_or_else(|| ClientError::Validation(format!("unknown category {node_id}")))?;
        let body = PieceCreate {
            category_path: path.iter().map(|n| n.id().to_string()).collect(),
            description: description.trim().to_string(),
            quantity,
        };
        self.create_piece(&body).await
    }
}

fn validate_piece_create(piece: &PieceCreate) -> ClientResult<()> {
    if piece.category_path.is_empty() {
        return Err(ClientError::Validation("category path cannot be empty".into()));
    }
    if piece.description.trim().is_empty() {
        return Err(ClientError::Validation("description is required".into()));
    }
    if piece.quantity == 0 {
        return Err(ClientError::Validation("quantity must be at least 1".into()));
    }
    Ok(())
}

#[async_trait]
impl<H: HttpClient> InventoryService for ApiClient<H> {
    async fn filter_pieces(&self, query: &FilterQuery) -> ClientResult<Vec<InventoryPiece>> {
        self.require_session()?;
        tracing::debug!(?query, "Filtering pieces");
        let resp: DataResponse<Vec<InventoryPiece>> =
            self.http.get_with_query(routes::PIECES_FILTER, query).await?;
        Ok(resp.into_inner())
    }

    async fn list_pieces(&self) -> ClientResult<Vec<InventoryPiece>> {
        self.require_session()?;
        let resp: DataResponse<Vec<InventoryPiece>> = self.http.get(routes::PIECES).await?;
        Ok(resp.into_inner())
    }

    async fn create_piece(&self, piece: &PieceCreate) -> ClientResult<InventoryPiece> {
        validate_piece_create(piece)?;
        self.require_session()?;
        let resp: DataResponse<InventoryPiece> = self.http.post(routes::PIECES, piece).await?;
        let created = resp.into_inner();
        tracing::info!(piece_id = %created.id, "Piece created");
        Ok(created)
    }

    async fn update_price(&self, piece_id: &str, price: Decimal) -> ClientResult<InventoryPiece> {
        if price <= Decimal::ZERO {
            return Err(ClientError::Validation("price must be positive".into()));
        }
        self.require_session()?;
        let body = PiecePriceUpdate { price };
        let resp: DataResponse<InventoryPiece> =
            self.http.patch(&routes::piece(piece_id), &body).await?;
        Ok(resp.into_inner())
    }
}

#[async_trait]
impl<H: HttpClient> SalesService for ApiClient<H> {
    async fn create_sale(&self, sale: &SaleCreate) -> ClientResult<Sale> {
        if sale.client_name.trim().is_empty() {
            return Err(ClientError::Validation("client name is required".into()));
        }
        self.require_session()?;
        let resp: DataResponse<Sale> = self.http.post(routes::SALES, sale).await?;
        let created = resp.into_inner();
        tracing::info!(sale_id = %created.id, "Sale created");
        Ok(created)
    }

    async fn add_piece_to_sale(&self, sale_id: &str, item: &SalePieceAdd) -> ClientResult<Sale> {
        if item.quantity == 0 {
            return Err(ClientError::Validation("quantity must be at least 1".into()));
        }
        self.require_session()?;
        let resp: DataResponse<Sale> = self.http.post(&routes::sale_pieces(sale_id), item).await?;
        Ok(resp.into_inner())
    }

    async fn confirm_payment(&self, sale_id: &str) -> ClientResult<Sale> {
        self.require_session()?;
        let resp: DataResponse<Sale> = self
            .http
            .patch_empty(&routes::sale_confirm_payment(sale_id))
            .await?;
        Ok(resp.into_inner())
    }

    async fn set_shipping_value(&self, sale_id: &str, value: Decimal) -> ClientResult<Sale> {
        if value < Decimal::ZERO {
            return Err(ClientError::Validation("shipping value cannot be negative".into()));
        }
        self.require_session()?;
        let body = ShippingValueUpdate {
            shipping_value: value,
        };
        let resp: DataResponse<Sale> = self
            .http
            .patch(&routes::sale_shipping(sale_id), &body)
            .await?;
        Ok(resp.into_inner())
    }
}

impl<H: HttpClient> AuthSession for ApiClient<H> {
    fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}
