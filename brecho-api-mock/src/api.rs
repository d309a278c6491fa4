use crate::error::{ApiError, ApiResult};
use crate::state::MockState;
use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::header,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use shared::DataResponse;
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::error::ErrorCode;
use shared::models::{
    FilterQuery, InventoryPiece, PieceCreate, PiecePriceUpdate, Sale, SaleCreate, SalePieceAdd,
    ShippingValueUpdate,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

/// Requests handled at once
const MAX_CONCURRENT_REQUESTS: usize = 64;

type Data<T> = Json<DataResponse<T>>;

fn data<T>(value: T) -> Data<T> {
    Json(DataResponse::new(value))
}

/// Build the mock API router.
///
/// With `filter_route` disabled `GET /pieces/filter` is not registered and
/// falls through to `/pieces/{id}`, which only accepts `PATCH`, so clients
/// see `405 Method Not Allowed`.
pub fn router(state: MockState) -> Router {
    let mut pieces = Router::new()
        .route("/pieces", get(list_pieces).post(create_piece))
        .route("/pieces/{id}", patch(update_price));
    if state.config.filter_route {
        pieces = pieces.route("/pieces/filter", get(filter_pieces));
    }

    let protected = pieces
        .route("/sales", post(create_sale))
        .route("/sales/{id}/pieces", post(add_piece_to_sale))
        .route("/sales/{id}/confirm-payment", patch(confirm_payment))
        .route("/sales/{id}/shipping", patch(set_shipping_value))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/auth/login", post(login))
        .merge(protected)
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bearer token check for every route except login
async fn require_token(
    State(state): State<MockState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::new(ErrorCode::NotAuthenticated))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::new(ErrorCode::NotAuthenticated))?;
    if token != state.config.token {
        return Err(ApiError::new(ErrorCode::TokenInvalid));
    }
    Ok(next.run(request).await)
}

async fn login(
    State(state): State<MockState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Data<LoginResponse>> {
    if req.username != state.config.username || req.password != state.config.password {
        tracing::warn!(username = %req.username, "Login failed");
        return Err(ApiError::new(ErrorCode::InvalidCredentials));
    }
    tracing::info!(username = %req.username, "Login successful");
    Ok(data(LoginResponse {
        token: state.config.token.clone(),
        user: UserInfo {
            id: "user-1".to_string(),
            username: req.username,
            name: Some("Administrador".to_string()),
        },
    }))
}

async fn list_pieces(State(state): State<MockState>) -> Data<Vec<InventoryPiece>> {
    data(state.list_pieces())
}

async fn filter_pieces(
    State(state): State<MockState>,
    Query(query): Query<FilterQuery>,
) -> Data<Vec<InventoryPiece>> {
    let pieces = state.filter_pieces(&query);
    tracing::debug!(?query, count = pieces.len(), "Pieces filtered");
    data(pieces)
}

async fn create_piece(
    State(state): State<MockState>,
    Json(req): Json<PieceCreate>,
) -> ApiResult<Data<InventoryPiece>> {
    state.create_piece(req).map(data)
}

async fn update_price(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(req): Json<PiecePriceUpdate>,
) -> ApiResult<Data<InventoryPiece>> {
    state.update_price(&id, req.price).map(data)
}

async fn create_sale(
    State(state): State<MockState>,
    Json(req): Json<SaleCreate>,
) -> ApiResult<Data<Sale>> {
    state.create_sale(req).map(data)
}

async fn add_piece_to_sale(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(req): Json<SalePieceAdd>,
) -> ApiResult<Data<Sale>> {
    state
        .add_piece_to_sale(&id, &req.piece_id, req.quantity)
        .map(data)
}

async fn confirm_payment(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> ApiResult<Data<Sale>> {
    state.confirm_payment(&id).map(data)
}

async fn set_shipping_value(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(req): Json<ShippingValueUpdate>,
) -> ApiResult<Data<Sale>> {
    state.set_shipping_value(&id, req.shipping_value).map(data)
}
