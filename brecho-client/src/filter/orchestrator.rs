//! Piece filter orchestration
//!
//! Decides when to query, calls `/pieces/filter`, falls back to a
//! client-side filter when the route is missing and publishes the result
//! list through a `watch` channel.
//!
//! Every fetch is tagged with a sequence number; a response that is not
//! the latest issued is dropped, so a slow, superseded request can never
//! overwrite the list of a newer one.

use super::Debouncer;
use super::search::filter_fallback;
use crate::api::InventoryService;
use crate::config::DEFAULT_SEARCH_DEBOUNCE_MS;
use crate::session::AuthSession;
use crate::{ClientError, ClientResult};
use parking_lot::Mutex;
use shared::models::{FilterQuery, InventoryPiece};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// What the piece list shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieceListState {
    pub pieces: Vec<InventoryPiece>,
    pub loading: bool,
    /// Last failure, for the empty-state message
    pub last_error: Option<String>,
}

/// Where a result list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// `/pieces/filter`
    Server,
    /// `/pieces` filtered locally
    Fallback,
}

/// Result of one filter run
#[derive(Debug)]
pub enum FilterOutcome {
    Loaded {
        pieces: Vec<InventoryPiece>,
        source: FetchSource,
    },
    /// No search text and no qualifier: list cleared, nothing requested
    Cleared,
    /// A newer run started before this one finished; result dropped
    Superseded,
    /// Request failed; list cleared
    Failed(ClientError),
}

impl FilterOutcome {
    pub fn pieces(&self) -> &[InventoryPiece] {
        match self {
            FilterOutcome::Loaded { pieces, .. } => pieces,
            _ => &[],
        }
    }
}

struct FilterCore<S: ?Sized> {
    service: Arc<S>,
    session: Arc<dyn AuthSession>,
    latest: AtomicU64,
    state: watch::Sender<PieceListState>,
}

impl<S: InventoryService + ?Sized> FilterCore<S> {
    fn next_seq(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// Empty list; any in-flight response becomes stale
    fn clear(&self) {
        self.next_seq();
        self.state.send_replace(PieceListState::default());
    }

    async fn run(&self, query: FilterQuery) -> FilterOutcome {
        let seq = self.next_seq();

        if !query.is_active() {
            self.state.send_replace(PieceListState::default());
            return FilterOutcome::Cleared;
        }

        if !self.session.is_authenticated() {
            let err = ClientError::Unauthorized("no active session".into());
            tracing::warn!(seq, "Piece filter requested without a session");
            self.state.send_replace(PieceListState {
                last_error: Some(err.to_string()),
                ..Default::default()
            });
            return FilterOutcome::Failed(err);
        }

        self.state.send_modify(|s| s.loading = true);
        let result = self.fetch(&query).await;

        if !self.is_latest(seq) {
            tracing::debug!(seq, "Discarding superseded filter response");
            return FilterOutcome::Superseded;
        }

        match result {
            Ok((pieces, source)) => {
                tracing::debug!(seq, count = pieces.len(), ?source, "Pieces loaded");
                self.state.send_replace(PieceListState {
                    pieces: pieces.clone(),
                    loading: false,
                    last_error: None,
                });
                FilterOutcome::Loaded { pieces, source }
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, ?query, "Piece filter failed");
                self.state.send_replace(PieceListState {
                    last_error: Some(e.to_string()),
                    ..Default::default()
                });
                FilterOutcome::Failed(e)
            }
        }
    }

    async fn fetch(&self, query: &FilterQuery) -> ClientResult<(Vec<InventoryPiece>, FetchSource)> {
        match self.service.filter_pieces(query).await {
            Ok(pieces) => Ok((pieces, FetchSource::Server)),
            Err(e) if e.is_route_missing() => {
                tracing::info!(error = %e, "Filter route unavailable, filtering locally");
                let all = self.service.list_pieces().await?;
                Ok((filter_fallback(all, query), FetchSource::Fallback))
            }
            Err(e) => Err(e),
        }
    }
}

/// Piece filter for one screen instance
///
/// Owns at most one pending debounce task. Dropping the filter (screen
/// unmount) aborts it.
pub struct PieceFilter<S: InventoryService + ?Sized + 'static> {
    core: Arc<FilterCore<S>>,
    debouncer: Arc<Mutex<Debouncer<FilterQuery>>>,
    timer: Option<JoinHandle<()>>,
}

impl<S: InventoryService + ?Sized + 'static> PieceFilter<S> {
    pub fn new(service: Arc<S>, session: Arc<dyn AuthSession>) -> Self {
        let (state, _) = watch::channel(PieceListState::default());
        Self {
            core: Arc::new(FilterCore {
                service,
                session,
                latest: AtomicU64::new(0),
                state,
            }),
            debouncer: Arc::new(Mutex::new(Debouncer::new(Duration::from_millis(
                DEFAULT_SEARCH_DEBOUNCE_MS,
            )))),
            timer: None,
        }
    }

    /// Override the search debounce
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.cancel_pending();
        self.debouncer = Arc::new(Mutex::new(Debouncer::new(delay)));
        self
    }

    pub fn debounce(&self) -> Duration {
        self.debouncer.lock().delay()
    }

    /// Watch the piece list
    pub fn subscribe(&self) -> watch::Receiver<PieceListState> {
        self.core.state.subscribe()
    }

    /// Snapshot of the piece list
    pub fn state(&self) -> PieceListState {
        self.core.state.borrow().clone()
    }

    /// A debounced query is waiting to fire
    pub fn has_pending(&self) -> bool {
        self.debouncer.lock().is_pending()
    }

    /// Search text changed: restart the quiet period with `query`.
    ///
    /// An inactive query clears the list right away and nothing is sent.
    /// Must be called from within a tokio runtime.
    pub fn search_changed(&mut self, query: FilterQuery) {
        self.cancel_pending();

        if !query.is_active() {
            self.core.clear();
            return;
        }

        let deadline = {
            let mut debouncer = self.debouncer.lock();
            debouncer.push(query, Instant::now());
            debouncer.deadline()
        };
        let Some(deadline) = deadline else {
            return;
        };

        let core = Arc::clone(&self.core);
        let debouncer = Arc::clone(&self.debouncer);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let due = debouncer.lock().poll(Instant::now());
            if let Some(query) = due {
                core.run(query).await;
            }
        }));
    }

    /// Run `query` immediately, cancelling any pending debounced search
    pub async fn apply_now(&mut self, query: FilterQuery) -> FilterOutcome {
        self.cancel_pending();
        self.core.run(query).await
    }

    /// Cancel pending work and empty the list
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.core.clear();
    }

    /// Screen unmount: nothing may fire afterwards
    pub fn shutdown(&mut self) {
        self.debouncer.lock().cancel();
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Stop a debounce that has not fired yet. A fetch already running is
    /// left to finish; the sequence check drops its result.
    fn cancel_pending(&mut self) {
        let waiting = self.debouncer.lock().cancel().is_some();
        if let Some(timer) = self.timer.take()
            && waiting
        {
            timer.abort();
        }
    }
}

impl<S: InventoryService + ?Sized + 'static> Drop for PieceFilter<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use shared::models::PieceCreate;
    use tokio::time::sleep;

    pub(crate) struct Authenticated(pub bool);

    impl AuthSession for Authenticated {
        fn is_authenticated(&self) -> bool {
            self.0
        }
    }

    pub(crate) fn piece(id: &str, name: &str, description: &str) -> InventoryPiece {
        InventoryPiece {
            id: id.into(),
            name: name.into(),
            description: Some(description.into()),
            quantity: 3,
            price: None,
            category_id: None,
            subcategory_id: None,
        }
    }

    /// Scripted inventory: records every call with its (virtual) time
    pub(crate) struct FakeInventory {
        pub filter_route: bool,
        pub fail_with_500: bool,
        pub latency: Duration,
        pub stock: Vec<InventoryPiece>,
        pub filter_calls: Mutex<Vec<(Instant, FilterQuery)>>,
        pub list_calls: Mutex<usize>,
    }

    impl FakeInventory {
        pub fn new(stock: Vec<InventoryPiece>) -> Self {
            Self {
                filter_route: true,
                fail_with_500: false,
                latency: Duration::ZERO,
                stock,
                filter_calls: Mutex::new(Vec::new()),
                list_calls: Mutex::new(0),
            }
        }

        pub fn filter_count(&self) -> usize {
            self.filter_calls.lock().len()
        }

        pub fn last_query(&self) -> Option<FilterQuery> {
            self.filter_calls.lock().last().map(|(_, q)| q.clone())
        }
    }

    #[async_trait]
    impl InventoryService for FakeInventory {
        async fn filter_pieces(&self, query: &FilterQuery) -> ClientResult<Vec<InventoryPiece>> {
            self.filter_calls.lock().push((Instant::now(), query.clone()));
            if !self.latency.is_zero() {
                sleep(self.latency).await;
            }
            if self.fail_with_500 {
                return Err(ClientError::Internal("boom".into()));
            }
            if !self.filter_route {
                return Err(ClientError::NotFound("/pieces/filter".into()));
            }
            // the server is trusted to have filtered; echo a marker piece
            let term = query.search_term().unwrap_or_default();
            Ok(vec![piece("server", term, "from server")])
        }

        async fn list_pieces(&self) -> ClientResult<Vec<InventoryPiece>> {
            *self.list_calls.lock() += 1;
            Ok(self.stock.clone())
        }

        async fn create_piece(&self, _piece: &PieceCreate) -> ClientResult<InventoryPiece> {
            Err(ClientError::Internal("unused".into()))
        }

        async fn update_price(&self, _id: &str, _price: Decimal) -> ClientResult<InventoryPiece> {
            Err(ClientError::Internal("unused".into()))
        }
    }

    fn search(text: &str) -> FilterQuery {
        FilterQuery::from_path(Vec::<String>::new(), text)
    }

    fn filter(service: &Arc<FakeInventory>) -> PieceFilter<FakeInventory> {
        PieceFilter::new(Arc::clone(service), Arc::new(Authenticated(true)))
    }

    fn five_pieces() -> Vec<InventoryPiece> {
        vec![
            piece("1", "Jaqueta jeans", "azul"),
            piece("2", "Camiseta", "branca"),
            piece("3", "Casaco", "tipo jaqueta, couro"),
            piece("4", "Vestido", "floral"),
            piece("5", "Calça", "preta"),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_fires_once_with_latest_text() {
        let service = Arc::new(FakeInventory::new(vec![]));
        let mut filter = filter(&service);
        let start = Instant::now();

        filter.search_changed(search("c"));
        sleep(Duration::from_millis(100)).await;
        filter.search_changed(search("ca"));
        sleep(Duration::from_millis(500)).await;
        filter.search_changed(search("cal"));

        sleep(Duration::from_millis(499)).await;
        assert_eq!(service.filter_count(), 0);
        assert!(filter.has_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(service.filter_count(), 1);
        let (fired_at, query) = service.filter_calls.lock()[0].clone();
        assert_eq!(fired_at - start, Duration::from_millis(1100));
        assert_eq!(query.search.as_deref(), Some("cal"));
        assert_eq!(filter.state().pieces[0].name, "cal");

        // nothing else fires later
        sleep(Duration::from_secs(5)).await;
        assert_eq!(service.filter_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_erasing_search_within_window_sends_nothing() {
        let service = Arc::new(FakeInventory::new(vec![]));
        let mut filter = filter(&service);

        filter.search_changed(search("v"));
        filter.search_changed(search("ve"));
        filter.search_changed(search("ves"));
        sleep(Duration::from_millis(200)).await;
        filter.search_changed(search("ve"));
        filter.search_changed(search("v"));
        filter.search_changed(search(""));
        assert!(!filter.has_pending());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(service.filter_count(), 0);
        assert_eq!(filter.state(), PieceListState::default());
    }

    #[tokio::test]
    async fn test_fallback_filters_locally_on_missing_route() {
        let mut fake = FakeInventory::new(five_pieces());
        fake.filter_route = false;
        let service = Arc::new(fake);
        let mut filter = filter(&service);

        let outcome = filter.apply_now(search("JAQUETA")).await;
        let FilterOutcome::Loaded { pieces, source } = outcome else {
            panic!("expected loaded, got {outcome:?}");
        };
        assert_eq!(source, FetchSource::Fallback);
        let ids: Vec<&str> = pieces.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(*service.list_calls.lock(), 1);
        assert_eq!(filter.state().pieces.len(), 2);
    }

    #[tokio::test]
    async fn test_server_results_used_unmodified() {
        let service = Arc::new(FakeInventory::new(five_pieces()));
        let mut filter = filter(&service);

        let outcome = filter.apply_now(search("zzz")).await;
        assert!(matches!(
            outcome,
            FilterOutcome::Loaded { source: FetchSource::Server, .. }
        ));
        assert_eq!(outcome.pieces()[0].id, "server");
        assert_eq!(*service.list_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_other_failures_clear_the_list() {
        let mut fake = FakeInventory::new(five_pieces());
        fake.fail_with_500 = true;
        let service = Arc::new(fake);
        let mut filter = filter(&service);

        let outcome = filter.apply_now(search("jaqueta")).await;
        assert!(matches!(outcome, FilterOutcome::Failed(ClientError::Internal(_))));
        let state = filter.state();
        assert!(state.pieces.is_empty());
        assert!(!state.loading);
        assert!(state.last_error.is_some());
        assert_eq!(*service.list_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_sends_nothing() {
        let service = Arc::new(FakeInventory::new(five_pieces()));
        let mut filter = PieceFilter::new(Arc::clone(&service), Arc::new(Authenticated(false)));

        let outcome = filter.apply_now(search("jaqueta")).await;
        assert!(matches!(outcome, FilterOutcome::Failed(ref e) if e.is_unauthorized()));
        assert_eq!(service.filter_count(), 0);
    }

    #[tokio::test]
    async fn test_inactive_query_is_not_sent() {
        let service = Arc::new(FakeInventory::new(five_pieces()));
        let mut filter = filter(&service);

        let browsing = FilterQuery::from_path(["cat-001", "subcat-001"], "");
        assert!(matches!(filter.apply_now(browsing).await, FilterOutcome::Cleared));
        assert_eq!(service.filter_count(), 0);
    }

    #[tokio::test]
    async fn test_qualifier_without_gender_position_is_sent() {
        let service = Arc::new(FakeInventory::new(five_pieces()));
        let mut filter = filter(&service);

        let longo = FilterQuery::from_path(["cat-003", "subcat-007"], "").with_qualifier();
        let outcome = filter.apply_now(longo).await;
        assert!(matches!(outcome, FilterOutcome::Loaded { source: FetchSource::Server, .. }));
        assert_eq!(service.filter_count(), 1);
        assert!(service.last_query().is_some_and(|q| q.gender_id.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_response_is_dropped() {
        let mut fake = FakeInventory::new(vec![]);
        fake.latency = Duration::from_millis(300);
        let service = Arc::new(fake);
        let filter = filter(&service);

        // "old" answers at 300ms, after "new" was issued at 100ms
        let core = Arc::clone(&filter.core);
        let first = tokio::spawn({
            let core = Arc::clone(&core);
            async move { core.run(search("old")).await }
        });
        sleep(Duration::from_millis(100)).await;
        let second = core.run(search("new")).await;
        let first = first.await.unwrap();

        assert!(matches!(first, FilterOutcome::Superseded));
        assert!(matches!(second, FilterOutcome::Loaded { .. }));
        assert_eq!(filter.state().pieces[0].name, "new");
        assert!(!filter.state().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_during_fetch() {
        let mut fake = FakeInventory::new(vec![]);
        fake.latency = Duration::from_millis(300);
        let service = Arc::new(fake);
        let mut filter = filter(&service).with_debounce(Duration::from_millis(50));
        let rx = filter.subscribe();

        filter.search_changed(search("saia"));
        sleep(Duration::from_millis(100)).await;
        assert!(rx.borrow().loading);

        sleep(Duration::from_millis(300)).await;
        assert!(!rx.borrow().loading);
        assert_eq!(rx.borrow().pieces.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let service = Arc::new(FakeInventory::new(vec![]));
        let mut filter = filter(&service);
        filter.search_changed(search("blusa"));
        assert!(filter.has_pending());
        drop(filter);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(service.filter_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_now_cancels_pending_search() {
        let service = Arc::new(FakeInventory::new(vec![]));
        let mut filter = filter(&service);
        filter.search_changed(search("blu"));

        let gender = FilterQuery::from_path(["cat-001", "subcat-001", "subsubcat-001"], "");
        filter.apply_now(gender).await;
        sleep(Duration::from_secs(2)).await;

        assert_eq!(service.filter_count(), 1);
        assert_eq!(
            service.last_query().and_then(|q| q.gender_id),
            Some("subsubcat-001".to_string())
        );
    }
}
