//! Client against the in-memory mock backend over real HTTP

use brecho_api_mock::{MockConfig, MockState, serve_ephemeral};
use brecho_client::pricing::{PricingError, apply_price, pending_pricing};
use brecho_client::{
    AddToSaleError, ApiClient, ClientConfig, ClientError, FetchSource, FilterOutcome,
    InventoryBrowser, InventoryService, PieceFilter, SaleContext, SalesService, add_to_sale,
};
use rust_decimal::Decimal;
use shared::models::{FilterQuery, SaleCreate, SaleStatus, Taxonomy};
use std::sync::Arc;

async fn start(config: MockConfig) -> (MockState, ApiClient) {
    let state = MockState::new(config);
    let addr = serve_ephemeral(state.clone()).await.unwrap();
    let client = ApiClient::from_config(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    (state, client)
}

async fn signed_in(config: MockConfig) -> (MockState, ApiClient) {
    let (state, client) = start(config).await;
    client.login("admin", "admin").await.unwrap();
    (state, client)
}

fn ids(pieces: &[shared::models::InventoryPiece]) -> Vec<&str> {
    pieces.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_login_and_filter() {
    let (state, client) = signed_in(MockConfig::default()).await;
    assert!(client.session().token().is_some());

    let query = FilterQuery::from_path(["cat-001", "subcat-001"], "listrada");
    let pieces = client.filter_pieces(&query).await.unwrap();
    assert_eq!(ids(&pieces), ["p-6"]);
    assert_eq!(state.filter_hits(), 1);
}

#[tokio::test]
async fn test_wrong_password() {
    let (_, client) = start(MockConfig::default()).await;
    let err = client.login("admin", "nope").await.unwrap_err();
    assert!(err.is_unauthorized(), "{err}");
    assert!(client.session().token().is_none());
}

#[tokio::test]
async fn test_fallback_when_filter_route_is_missing() {
    let (state, client) = signed_in(MockConfig::default().without_filter_route()).await;

    let err = client
        .filter_pieces(&FilterQuery::from_path(Vec::<String>::new(), "jaqueta"))
        .await
        .unwrap_err();
    assert!(err.is_route_missing(), "{err}");

    let session = Arc::new(client.session().clone());
    let mut filter = PieceFilter::new(Arc::new(client), session);
    match filter.apply_now(FilterQuery::from_path(Vec::<String>::new(), "JAQUETA")).await {
        FilterOutcome::Loaded { pieces, source } => {
            assert_eq!(source, FetchSource::Fallback);
            assert_eq!(ids(&pieces), ["p-1", "p-3"]);
        }
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(state.filter_hits(), 0);
    assert_eq!(state.list_hits(), 1);
}

#[tokio::test]
async fn test_unauthenticated_filter_sends_nothing() {
    let (state, client) = start(MockConfig::default()).await;
    let session = Arc::new(client.session().clone());
    let mut filter = PieceFilter::new(Arc::new(client), session);

    let outcome = filter
        .apply_now(FilterQuery::from_path(Vec::<String>::new(), "jaqueta"))
        .await;
    assert!(matches!(outcome, FilterOutcome::Failed(ClientError::Unauthorized(_))));
    assert_eq!(state.filter_hits(), 0);
    assert_eq!(state.list_hits(), 0);
}

#[tokio::test]
async fn test_browser_against_backend() {
    let (_, client) = signed_in(MockConfig::default()).await;
    let session = Arc::new(client.session().clone());
    let mut browser =
        InventoryBrowser::new(Arc::new(Taxonomy::brecho_default()), Arc::new(client), session);

    browser.tap_id("cat-001").await.unwrap();
    browser.tap_id("subcat-001").await.unwrap();
    assert!(browser.state().pieces.is_empty());

    browser.tap_id("subsubcat-001").await.unwrap();
    assert_eq!(ids(&browser.state().pieces), ["p-2"]);

    assert!(browser.back().await);
    assert!(browser.state().pieces.is_empty());
}

#[tokio::test]
async fn test_shallow_leaf_tap_against_backend() {
    let (state, client) = signed_in(MockConfig::default()).await;
    let session = Arc::new(client.session().clone());
    let mut browser =
        InventoryBrowser::new(Arc::new(Taxonomy::brecho_default()), Arc::new(client), session);

    browser.tap_id("cat-003").await.unwrap();
    assert_eq!(state.filter_hits(), 0);

    browser.tap_id("subcat-007").await.unwrap();
    assert_eq!(state.filter_hits(), 1);
    assert_eq!(ids(&browser.state().pieces), ["p-4"]);
}

#[tokio::test]
async fn test_shallow_leaf_tap_falls_back() {
    let (state, client) = signed_in(MockConfig::default().without_filter_route()).await;
    let session = Arc::new(client.session().clone());
    let mut browser =
        InventoryBrowser::new(Arc::new(Taxonomy::brecho_default()), Arc::new(client), session);

    browser.tap_id("cat-003").await.unwrap();
    browser.tap_id("subcat-007").await.unwrap();
    assert_eq!(state.list_hits(), 1);
    assert_eq!(ids(&browser.state().pieces), ["p-4"]);
}

#[tokio::test]
async fn test_sale_flow() {
    let (state, client) = signed_in(MockConfig::default()).await;

    let sale = client
        .create_sale(&SaleCreate {
            client_name: "Carla".into(),
            phone: Some("11 99999-0000".into()),
            address: None,
        })
        .await
        .unwrap();
    assert_eq!(sale.status, SaleStatus::Open);
    let ctx = SaleContext::for_sale(sale.id.clone());

    let all = client.list_pieces().await.unwrap();
    let jeans = all.iter().find(|p| p.id == "p-5").unwrap().clone();

    // more than the piece shows in stock: rejected locally
    let err = add_to_sale(&client, &ctx, &jeans, "4").await.unwrap_err();
    assert!(matches!(err, AddToSaleError::InvalidQuantity(_)));

    let sale = add_to_sale(&client, &ctx, &jeans, "2").await.unwrap();
    assert_eq!(sale.quantity_of("p-5"), 2);
    assert_eq!(state.piece("p-5").unwrap().quantity, 1);

    // stale local stock: the server has the final word
    let err = add_to_sale(&client, &ctx, &jeans, "3").await.unwrap_err();
    match err {
        AddToSaleError::Rejected(ClientError::Api { status, .. }) => assert_eq!(status, 409),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(state.sale(&sale.id).unwrap().quantity_of("p-5"), 2);

    let sale = client
        .set_shipping_value(&sale.id, Decimal::new(1990, 2))
        .await
        .unwrap();
    assert_eq!(sale.shipping_value, Some(Decimal::new(1990, 2)));

    let sale = client.confirm_payment(&sale.id).await.unwrap();
    assert_eq!(sale.status, SaleStatus::PaymentConfirmed);
    assert!(client.confirm_payment(&sale.id).await.is_err());
}

#[tokio::test]
async fn test_register_and_price_piece() {
    let (_, client) = signed_in(MockConfig::default()).await;
    let taxonomy = Taxonomy::brecho_default();

    let piece = client
        .create_piece_at(&taxonomy, "subsubcat-014", "Blazer xadrez", 1)
        .await
        .unwrap();
    assert_eq!(piece.category_id.as_deref(), Some("cat-004"));
    assert_eq!(piece.subcategory_id.as_deref(), Some("subcat-010"));

    let pending = client.list_pieces().await.unwrap();
    assert!(pending_pricing(&pending).iter().any(|p| p.id == piece.id));

    let err = apply_price(&client, &piece.id, "abc").await.unwrap_err();
    assert!(matches!(err, PricingError::Invalid(_)));

    let priced = apply_price(&client, &piece.id, "R$ 120,00").await.unwrap();
    assert_eq!(priced.price, Some(Decimal::new(12000, 2)));

    let pending = client.list_pieces().await.unwrap();
    assert!(!pending_pricing(&pending).iter().any(|p| p.id == piece.id));
}
