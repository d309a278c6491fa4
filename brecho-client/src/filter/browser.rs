//! Inventory screen controller
//!
//! One instance per screen mount. Ties the navigation stack, the path
//! resolver and the piece filter together; drop it (or call
//! [`InventoryBrowser::close`]) when the screen goes away.

use super::{FilterOutcome, PieceFilter, PieceListState};
use crate::api::InventoryService;
use crate::navigation::{CategoryPath, NavigationError, NavigationStack, TapOutcome, resolve_path};
use crate::selection::{PieceSelection, SaleContext};
use crate::session::AuthSession;
use shared::models::{FilterQuery, Level, Taxonomy, TaxonomyNode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub struct InventoryBrowser<S: InventoryService + ?Sized + 'static> {
    taxonomy: Arc<Taxonomy>,
    stack: NavigationStack,
    search: String,
    filter: PieceFilter<S>,
    selection: PieceSelection,
    sale: SaleContext,
}

impl<S: InventoryService + ?Sized + 'static> InventoryBrowser<S> {
    pub fn new(taxonomy: Arc<Taxonomy>, service: Arc<S>, session: Arc<dyn AuthSession>) -> Self {
        let stack = NavigationStack::new(&taxonomy);
        Self {
            taxonomy,
            stack,
            search: String::new(),
            filter: PieceFilter::new(service, session),
            selection: PieceSelection::new(),
            sale: SaleContext::browsing(),
        }
    }

    /// Pieces picked here are attached to `sale`
    pub fn with_sale(mut self, sale: SaleContext) -> Self {
        self.sale = sale;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.filter = self.filter.with_debounce(delay);
        self
    }

    /// Tap a node of the current level.
    ///
    /// Drilling refetches right away when a search is active, otherwise the
    /// list is cleared. A terminal node becomes the qualifier and is fetched
    /// immediately.
    pub async fn tap(&mut self, node: &TaxonomyNode) -> Result<TapOutcome, NavigationError> {
        let outcome = self.stack.tap(node)?;
        tracing::debug!(node = node.id(), ?outcome, depth = self.stack.depth(), "Taxonomy tap");
        self.refresh_now().await;
        Ok(outcome)
    }

    /// Tap by id within the current level
    pub async fn tap_id(&mut self, id: &str) -> Result<TapOutcome, NavigationError> {
        let node = self
            .stack
            .current_level()
            .iter()
            .find(|n| n.id() == id)
            .cloned()
            .ok_or_else(|| NavigationError::NotInCurrentLevel(id.to_string()))?;
        self.tap(&node).await
    }

    /// Back one level. Returns `false` at the root.
    pub async fn back(&mut self) -> bool {
        if !self.stack.pop() {
            return false;
        }
        self.refresh_now().await;
        true
    }

    /// Deselect the qualifier chip. Refetches when a search is still active,
    /// otherwise clears the list. Returns `false` when nothing was selected.
    pub async fn clear_qualifier(&mut self) -> bool {
        if !self.stack.clear_gender() {
            return false;
        }
        self.refresh_now().await;
        true
    }

    /// Search text changed (debounced)
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        let query = self.current_query();
        self.filter.search_changed(query);
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Back to the root with no search, no qualifier and no selection
    pub fn reset(&mut self) {
        self.stack.reset();
        self.search.clear();
        self.selection.clear();
        self.filter.clear();
    }

    /// Screen unmount
    pub fn close(&mut self) {
        self.filter.shutdown();
    }

    pub fn path(&self) -> CategoryPath {
        resolve_path(&self.stack)
    }

    pub fn current_query(&self) -> FilterQuery {
        self.path().to_filter_query(&self.search)
    }

    pub fn current_level(&self) -> &Level {
        self.stack.current_level()
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn subscribe(&self) -> watch::Receiver<PieceListState> {
        self.filter.subscribe()
    }

    pub fn state(&self) -> PieceListState {
        self.filter.state()
    }

    pub fn selection(&self) -> &PieceSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut PieceSelection {
        &mut self.selection
    }

    pub fn sale(&self) -> &SaleContext {
        &self.sale
    }

    async fn refresh_now(&mut self) -> Option<FilterOutcome> {
        let query = self.current_query();
        if query.is_active() {
            Some(self.filter.apply_now(query).await)
        } else {
            self.filter.clear();
            None
        }
    }
}
