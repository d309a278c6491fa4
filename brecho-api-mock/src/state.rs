//! In-memory backend state

use crate::config::MockConfig;
use crate::error::{ApiError, ApiResult};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    FilterQuery, InventoryPiece, PieceCreate, Sale, SaleCreate, SalePiece, SaleStatus, Taxonomy,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A piece as the backend stores it: the gender qualifier lives here and is
/// never sent to clients.
#[derive(Debug, Clone)]
pub struct StockPiece {
    pub piece: InventoryPiece,
    pub gender_id: Option<String>,
}

impl StockPiece {
    fn matches(&self, query: &FilterQuery) -> bool {
        let same = |wanted: &Option<String>, actual: Option<&str>| {
            wanted.as_deref().is_none_or(|id| actual == Some(id))
        };
        same(&query.category_id, self.piece.category_id.as_deref())
            && same(&query.subcategory_id, self.piece.subcategory_id.as_deref())
            && same(&query.gender_id, self.gender_id.as_deref())
            && self.piece.matches_search(query.search_term().unwrap_or_default())
    }
}

/// Request counters, read by tests
#[derive(Debug, Default)]
pub struct Hits {
    pub filter: AtomicUsize,
    pub list: AtomicUsize,
}

#[derive(Clone)]
pub struct MockState {
    pub config: Arc<MockConfig>,
    pub taxonomy: Arc<Taxonomy>,
    pieces: Arc<RwLock<Vec<StockPiece>>>,
    sales: Arc<RwLock<HashMap<String, Sale>>>,
    pub hits: Arc<Hits>,
}

impl MockState {
    /// Seeded with a handful of pieces across the default taxonomy
    pub fn new(config: MockConfig) -> Self {
        Self::with_pieces(config, seed_pieces())
    }

    pub fn with_pieces(config: MockConfig, pieces: Vec<StockPiece>) -> Self {
        Self {
            config: Arc::new(config),
            taxonomy: Arc::new(Taxonomy::brecho_default()),
            pieces: Arc::new(RwLock::new(pieces)),
            sales: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(Hits::default()),
        }
    }

    pub fn filter_hits(&self) -> usize {
        self.hits.filter.load(Ordering::Relaxed)
    }

    pub fn list_hits(&self) -> usize {
        self.hits.list.load(Ordering::Relaxed)
    }

    // ========== Pieces ==========

    pub fn list_pieces(&self) -> Vec<InventoryPiece> {
        self.hits.list.fetch_add(1, Ordering::Relaxed);
        self.pieces.read().iter().map(|p| p.piece.clone()).collect()
    }

    /// Category, subcategory and gender ids ANDed with the search text
    pub fn filter_pieces(&self, query: &FilterQuery) -> Vec<InventoryPiece> {
        self.hits.filter.fetch_add(1, Ordering::Relaxed);
        self.pieces
            .read()
            .iter()
            .filter(|p| p.matches(query))
            .map(|p| p.piece.clone())
            .collect()
    }

    pub fn piece(&self, id: &str) -> Option<InventoryPiece> {
        self.pieces
            .read()
            .iter()
            .find(|p| p.piece.id == id)
            .map(|p| p.piece.clone())
    }

    /// Register a piece under a taxonomy path: `[category, subcategory?, gender?]`
    pub fn create_piece(&self, req: PieceCreate) -> ApiResult<InventoryPiece> {
        if req.description.trim().is_empty() {
            return Err(ApiError::with_message(ErrorCode::RequiredField, "description is required"));
        }
        if req.quantity == 0 {
            return Err(ApiError::validation("quantity must be at least 1"));
        }
        let Some(last) = req.category_path.last() else {
            return Err(ApiError::with_message(ErrorCode::RequiredField, "categoryPath is required"));
        };
        let resolved = self
            .taxonomy
            .path_to(last)
            .ok_or_else(|| ApiError::new(ErrorCode::CategoryNotFound))?;
        let ids: Vec<&str> = resolved.iter().map(|n| n.id()).collect();
        if ids != req.category_path.iter().map(String::as_str).collect::<Vec<_>>() {
            return Err(ApiError::with_message(
                ErrorCode::CategoryNotFound,
                "categoryPath does not follow the taxonomy",
            ));
        }

        // named after the subcategory when there is one
        let name = resolved
            .get(1)
            .or(resolved.first())
            .map(|n| n.name().to_string())
            .unwrap_or_default();
        let piece = InventoryPiece {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: Some(req.description.trim().to_string()),
            quantity: req.quantity,
            price: None,
            category_id: ids.first().map(|s| s.to_string()),
            subcategory_id: ids.get(1).map(|s| s.to_string()),
        };
        self.pieces.write().push(StockPiece {
            piece: piece.clone(),
            gender_id: ids.get(2).map(|s| s.to_string()),
        });
        tracing::info!(piece_id = %piece.id, path = ?ids, "Piece created");
        Ok(piece)
    }

    pub fn update_price(&self, id: &str, price: Decimal) -> ApiResult<InventoryPiece> {
        if price <= Decimal::ZERO {
            return Err(ApiError::new(ErrorCode::PieceInvalidPrice));
        }
        let mut pieces = self.pieces.write();
        let stock = pieces
            .iter_mut()
            .find(|p| p.piece.id == id)
            .ok_or_else(|| ApiError::new(ErrorCode::PieceNotFound))?;
        stock.piece.price = Some(price);
        Ok(stock.piece.clone())
    }

    // ========== Sales ==========

    pub fn create_sale(&self, req: SaleCreate) -> ApiResult<Sale> {
        if req.client_name.trim().is_empty() {
            return Err(ApiError::new(ErrorCode::SaleClientRequired));
        }
        let sale = Sale {
            id: uuid::Uuid::new_v4().to_string(),
            client_name: req.client_name.trim().to_string(),
            phone: req.phone,
            address: req.address,
            status: SaleStatus::Open,
            shipping_value: None,
            pieces: Vec::new(),
            created_at: Some(chrono::Utc::now().timestamp_millis()),
        };
        self.sales.write().insert(sale.id.clone(), sale.clone());
        tracing::info!(sale_id = %sale.id, "Sale created");
        Ok(sale)
    }

    pub fn sale(&self, id: &str) -> Option<Sale> {
        self.sales.read().get(id).cloned()
    }

    /// Reserve `quantity` units of a piece for an open sale
    pub fn add_piece_to_sale(&self, sale_id: &str, piece_id: &str, quantity: u32) -> ApiResult<Sale> {
        if quantity == 0 {
            return Err(ApiError::validation("quantity must be at least 1"));
        }
        // lock order: sales, then pieces
        let mut sales = self.sales.write();
        let sale = sales
            .get_mut(sale_id)
            .ok_or_else(|| ApiError::new(ErrorCode::SaleNotFound))?;
        if !sale.status.is_open() {
            return Err(ApiError::new(ErrorCode::SalePaymentConfirmed));
        }

        let mut pieces = self.pieces.write();
        let stock = pieces
            .iter_mut()
            .find(|p| p.piece.id == piece_id)
            .ok_or_else(|| ApiError::new(ErrorCode::PieceNotFound))?;
        if quantity > stock.piece.quantity {
            return Err(ApiError::with_message(
                ErrorCode::PieceOutOfStock,
                format!("only {} in stock", stock.piece.quantity),
            ));
        }
        stock.piece.quantity -= quantity;

        match sale.pieces.iter_mut().find(|p| p.piece_id == piece_id) {
            Some(line) => line.quantity += quantity,
            None => sale.pieces.push(SalePiece {
                piece_id: piece_id.to_string(),
                quantity,
            }),
        }
        Ok(sale.clone())
    }

    pub fn confirm_payment(&self, sale_id: &str) -> ApiResult<Sale> {
        let mut sales = self.sales.write();
        let sale = sales
            .get_mut(sale_id)
            .ok_or_else(|| ApiError::new(ErrorCode::SaleNotFound))?;
        if !sale.status.can_transition_to(SaleStatus::PaymentConfirmed) {
            return Err(ApiError::new(ErrorCode::SalePaymentConfirmed));
        }
        sale.status = SaleStatus::PaymentConfirmed;
        Ok(sale.clone())
    }

    pub fn set_shipping_value(&self, sale_id: &str, value: Decimal) -> ApiResult<Sale> {
        if value < Decimal::ZERO {
            return Err(ApiError::with_message(
                ErrorCode::ValueOutOfRange,
                "shipping value cannot be negative",
            ));
        }
        let mut sales = self.sales.write();
        let sale = sales
            .get_mut(sale_id)
            .ok_or_else(|| ApiError::new(ErrorCode::SaleNotFound))?;
        if !sale.status.is_open() {
            return Err(ApiError::new(ErrorCode::SalePaymentConfirmed));
        }
        sale.shipping_value = Some(value);
        Ok(sale.clone())
    }
}

fn stock(
    id: &str,
    name: &str,
    description: &str,
    quantity: u32,
    price: Option<Decimal>,
    path: [Option<&str>; 3],
) -> StockPiece {
    let [category, subcategory, gender] = path.map(|p| p.map(str::to_string));
    StockPiece {
        piece: InventoryPiece {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            quantity,
            price,
            category_id: category,
            subcategory_id: subcategory,
        },
        gender_id: gender,
    }
}

/// Demo stock
pub fn seed_pieces() -> Vec<StockPiece> {
    vec![
        stock(
            "p-1",
            "Jaqueta jeans",
            "Azul clara, pouco uso",
            2,
            Some(Decimal::new(8990, 2)),
            [Some("cat-004"), Some("subcat-009"), Some("subsubcat-011")],
        ),
        stock(
            "p-2",
            "Camiseta básica",
            "Branca, algodão",
            5,
            Some(Decimal::new(2500, 2)),
            [Some("cat-001"), Some("subcat-001"), Some("subsubcat-001")],
        ),
        stock(
            "p-3",
            "Casaco de couro",
            "Estilo jaqueta motoqueiro",
            1,
            None,
            [Some("cat-004"), Some("subcat-010"), Some("subsubcat-013")],
        ),
        stock(
            "p-4",
            "Vestido floral",
            "Longo, estampa de flores",
            1,
            Some(Decimal::new(6000, 2)),
            [Some("cat-003"), Some("subcat-007"), None],
        ),
        stock(
            "p-5",
            "Calça jeans",
            "Escura, cintura alta",
            3,
            None,
            [Some("cat-002"), Some("subcat-004"), Some("subsubcat-007")],
        ),
        stock(
            "p-6",
            "Camiseta listrada",
            "Azul e branca",
            2,
            Some(Decimal::new(3000, 2)),
            [Some("cat-001"), Some("subcat-001"), Some("subsubcat-002")],
        ),
    ]
}
