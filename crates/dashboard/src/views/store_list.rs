//! Store list view: the dashboard's home page.

use std::time::Duration;

use storemaker_core::{NewStore, Store, StoreId, StoreListEnvelope, StoreSummary};
use tokio::sync::RwLock;
use tracing::instrument;

use super::{Gate, Lifecycle, Reconcile, ViewContext, gate};
use crate::api::ApiError;
use crate::services::confirm::DELETE_STORE_PROMPT;

/// What the list page should show, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDisplay {
    /// The session is still resolving.
    SessionPending,
    /// The visitor was sent to the login page; render nothing.
    Redirected,
    /// Loading skeletons.
    Loading,
    /// No stores: call to action.
    Empty,
    /// Grid of store cards.
    Populated,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The store has no id yet.
    Skipped,
    /// The user declined the confirmation prompt.
    Declined,
    Deleted,
    Failed,
}

#[derive(Debug)]
struct ListState {
    stores: Vec<Store>,
    loading: bool,
    session_pending: bool,
    redirected: bool,
    modal_open: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            stores: Vec::new(),
            loading: true,
            session_pending: false,
            redirected: false,
            modal_open: false,
        }
    }
}

/// Read-only copy of the list view's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub display: ListDisplay,
    pub stores: Vec<Store>,
    pub summary: StoreSummary,
    pub modal_open: bool,
}

pub struct StoreListView {
    ctx: ViewContext,
    state: RwLock<ListState>,
    lifecycle: Lifecycle,
    reconcile_delay: Duration,
}

impl StoreListView {
    #[must_use]
    pub fn new(ctx: ViewContext, reconcile_delay: Duration) -> Self {
        Self {
            ctx,
            state: RwLock::new(ListState::default()),
            lifecycle: Lifecycle::default(),
            reconcile_delay,
        }
    }

    /// Consult the session without loading anything.
    ///
    /// Returns `true` when the visitor is signed in and the list may load.
    pub async fn check_session(&self) -> bool {
        self.lifecycle.mount();
        let gate = gate(&self.ctx);
        let mut state = self.state.write().await;
        state.session_pending = gate == Gate::Pending;
        state.redirected = gate == Gate::Redirected;
        if state.redirected {
            state.loading = false;
        }
        gate == Gate::Open
    }

    /// Mount the view: gate on the session, then load the list.
    pub async fn mount(&self) {
        if self.check_session().await {
            self.fetch_stores().await;
        }
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    /// Load the store collection, accepting every known envelope shape.
    #[instrument(skip(self))]
    pub async fn fetch_stores(&self) {
        let ticket = self.lifecycle.begin();
        self.state.write().await.loading = true;

        let result = self.ctx.api.list_stores().await;

        if !self.lifecycle.is_current(ticket) {
            tracing::debug!("discarding stale store list");
            return;
        }

        let failed = {
            let mut state = self.state.write().await;
            state.loading = false;
            match result {
                Ok(body) => {
                    let envelope = StoreListEnvelope::parse(body);
                    tracing::debug!(shape = envelope.shape(), "store list received");
                    state.stores = envelope.into_stores();
                    false
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to fetch stores");
                    state.stores.clear();
                    true
                }
            }
        };

        if failed {
            self.ctx.notifier.error("Failed to load stores");
        }
    }

    pub async fn open_create_modal(&self) {
        self.state.write().await.modal_open = true;
    }

    pub async fn close_create_modal(&self) {
        self.state.write().await.modal_open = false;
    }

    /// Create a store and append it optimistically.
    ///
    /// On failure the error is logged and announced; the list and the
    /// modal are left as they were.
    ///
    /// # Errors
    ///
    /// Returns the backend error after it has been reported to the user.
    #[instrument(skip(self, payload), fields(slug = %payload.slug))]
    pub async fn create_store(&self, payload: NewStore) -> Result<Reconcile, ApiError> {
        match self.ctx.api.create_store(&payload).await {
            Ok(store) => Ok(self.store_created(store).await),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create store");
                self.ctx.notifier.error("Failed to create store");
                Err(e)
            }
        }
    }

    /// Apply a successful create: append, close the modal, announce.
    ///
    /// Asks for a reconciling re-fetch when the backend response lacks the
    /// server-computed fields.
    pub async fn store_created(&self, store: Store) -> Reconcile {
        let complete = store.is_complete();
        {
            let mut state = self.state.write().await;
            state.stores.push(store);
            state.modal_open = false;
        }
        self.ctx.notifier.success("Store created successfully!");

        if complete {
            Reconcile::None
        } else {
            Reconcile::After(self.reconcile_delay)
        }
    }

    /// Carry out a reconcile directive: wait, then re-fetch while mounted.
    ///
    /// In the browser the same directive becomes a delayed reload of
    /// `/dashboard/panel`, which mounts a fresh view and fetches.
    pub async fn reconcile(&self, reconcile: Reconcile) {
        if let Reconcile::After(delay) = reconcile {
            tokio::time::sleep(delay).await;
            if self.lifecycle.is_mounted() {
                self.fetch_stores().await;
            }
        }
    }

    /// Delete a store after confirmation and drop it from the list.
    #[instrument(skip(self))]
    pub async fn delete_store(&self, id: Option<StoreId>) -> DeleteOutcome {
        let Some(id) = id else {
            return DeleteOutcome::Skipped;
        };
        if !self.ctx.confirm.confirm(DELETE_STORE_PROMPT) {
            return DeleteOutcome::Declined;
        }

        match self.ctx.api.delete_store(id).await {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .stores
                    .retain(|store| store.id != Some(id));
                self.ctx.notifier.success("Store deleted successfully");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!(error = %e, store_id = %id, "Failed to delete store");
                self.ctx.notifier.error("Failed to delete store");
                DeleteOutcome::Failed
            }
        }
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.state.read().await;
        let display = if state.session_pending {
            ListDisplay::SessionPending
        } else if state.redirected {
            ListDisplay::Redirected
        } else if state.loading {
            ListDisplay::Loading
        } else if state.stores.is_empty() {
            ListDisplay::Empty
        } else {
            ListDisplay::Populated
        };

        ListSnapshot {
            display,
            summary: StoreSummary::from_stores(&state.stores),
            stores: state.stores.clone(),
            modal_open: state.modal_open,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use storemaker_core::StoreStatus;

    use super::*;
    use crate::services::{Route, SessionState, Toast};
    use crate::testing::{Harness, store};

    const DELAY: Duration = Duration::from_millis(1000);

    fn view(harness: &Harness) -> StoreListView {
        StoreListView::new(harness.ctx(), DELAY)
    }

    #[tokio::test]
    async fn test_anonymous_redirects_without_fetch() {
        let harness = Harness::new(SessionState::Anonymous);
        let view = view(&harness);

        view.mount().await;

        assert_eq!(view.snapshot().await.display, ListDisplay::Redirected);
        assert_eq!(harness.navigator.take(), Some(Route::Login));
        assert!(harness.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pending_session_waits() {
        let harness = Harness::new(SessionState::Loading);
        let view = view(&harness);

        view.mount().await;

        assert_eq!(view.snapshot().await.display, ListDisplay::SessionPending);
        assert_eq!(harness.navigator.take(), None);
        assert!(harness.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_loading_before_fetch() {
        let harness = Harness::signed_in();
        let view = view(&harness);

        assert!(view.check_session().await);
        assert_eq!(view.snapshot().await.display, ListDisplay::Loading);
        assert!(harness.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let harness = Harness::signed_in();
        let view = view(&harness);

        view.mount().await;

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.display, ListDisplay::Empty);
        assert_eq!(snapshot.summary, StoreSummary::default());
    }

    #[tokio::test]
    async fn test_populated_from_each_envelope() {
        for body in [
            json!([{ "id": 1, "name": "A", "status": "active" }]),
            json!({ "data": [{ "id": 1, "name": "A", "status": "active" }] }),
            json!({ "stores": [{ "id": 1, "name": "A", "status": "active" }] }),
        ] {
            let harness = Harness::signed_in();
            harness.api.set_list_body(body);
            let view = view(&harness);

            view.mount().await;

            let snapshot = view.snapshot().await;
            assert_eq!(snapshot.display, ListDisplay::Populated);
            assert_eq!(snapshot.summary.active, 1);
        }
    }

    #[tokio::test]
    async fn test_one_badly_typed_record_does_not_empty_the_list() {
        let harness = Harness::signed_in();
        harness.api.set_list_body(json!([
            { "id": 1, "name": "A", "status": "active" },
            { "id": 2, "name": null, "created_at": 1_700_000_000 },
            { "id": "3", "name": "C", "status": "draft" }
        ]));
        let view = view(&harness);

        view.mount().await;

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.display, ListDisplay::Populated);
        assert_eq!(snapshot.summary.total, 3);
        assert_eq!(snapshot.summary.draft, 1);
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_silently_empty() {
        let harness = Harness::signed_in();
        harness.api.set_list_body(json!({ "items": [] }));
        let view = view(&harness);

        view.mount().await;

        assert_eq!(view.snapshot().await.display, ListDisplay::Empty);
        assert!(harness.notifier.drain().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_and_notifies() {
        let harness = Harness::signed_in();
        harness.api.insert(store(1, "A", StoreStatus::Active));
        let view = view(&harness);
        view.mount().await;
        assert_eq!(view.snapshot().await.stores.len(), 1);

        harness.api.fail("list_stores");
        view.fetch_stores().await;

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.display, ListDisplay::Empty);
        assert_eq!(harness.notifier.drain(), vec![Toast::error("Failed to load stores")]);
    }

    #[tokio::test]
    async fn test_create_appends_exactly_one_before_reconcile() {
        let harness = Harness::signed_in();
        harness.api.insert(store(1, "A", StoreStatus::Active));
        let view = view(&harness);
        view.mount().await;
        view.open_create_modal().await;

        let payload = NewStore::from_input("Candles", "", "").unwrap();
        let reconcile = view.create_store(payload).await.unwrap();

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.stores.len(), 2);
        assert_eq!(snapshot.stores[1].name, "Candles");
        assert!(!snapshot.modal_open);
        assert_eq!(reconcile, Reconcile::None);
        assert_eq!(
            harness.notifier.drain(),
            vec![Toast::success("Store created successfully!")]
        );
        assert_eq!(harness.api.count("list_stores"), 1);
    }

    #[tokio::test]
    async fn test_incomplete_create_response_requests_reconcile() {
        let harness = Harness::signed_in();
        harness.api.set_create_response(Store {
            name: "Partial".to_string(),
            ..Store::default()
        });
        let view = view(&harness);
        view.mount().await;

        let payload = NewStore::from_input("Partial", "", "").unwrap();
        let reconcile = view.create_store(payload).await.unwrap();

        assert_eq!(reconcile, Reconcile::After(DELAY));
        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.stores.len(), 1);
        assert!(!snapshot.stores[0].is_persisted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconcile_refetches_after_delay() {
        let harness = Harness::signed_in();
        let view = view(&harness);
        view.mount().await;
        assert_eq!(harness.api.count("list_stores"), 1);

        harness.api.insert(store(7, "Server copy", StoreStatus::Draft));
        let started = tokio::time::Instant::now();
        view.reconcile(Reconcile::After(DELAY)).await;

        assert!(started.elapsed() >= DELAY);
        assert_eq!(harness.api.count("list_stores"), 2);
        assert_eq!(view.snapshot().await.stores[0].name, "Server copy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconcile_skipped_after_unmount() {
        let harness = Harness::signed_in();
        let view = view(&harness);
        view.mount().await;
        view.unmount();

        view.reconcile(Reconcile::After(DELAY)).await;

        assert_eq!(harness.api.count("list_stores"), 1);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_state() {
        let harness = Harness::signed_in();
        harness.api.fail("create_store");
        let view = view(&harness);
        view.mount().await;
        view.open_create_modal().await;

        let payload = NewStore::from_input("Candles", "", "").unwrap();
        assert!(view.create_store(payload).await.is_err());

        let snapshot = view.snapshot().await;
        assert!(snapshot.stores.is_empty());
        assert!(snapshot.modal_open);
        assert_eq!(harness.notifier.drain(), vec![Toast::error("Failed to create store")]);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_matching_record() {
        let harness = Harness::signed_in();
        for (id, name) in [(1, "A"), (2, "B"), (3, "C")] {
            harness.api.insert(store(id, name, StoreStatus::Draft));
        }
        let view = view(&harness);
        view.mount().await;

        let outcome = view.delete_store(Some(StoreId::new(2))).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        let names: Vec<_> = view
            .snapshot()
            .await
            .stores
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(
            harness.notifier.drain(),
            vec![Toast::success("Store deleted successfully")]
        );
        assert_eq!(
            harness.confirm.prompts(),
            vec![DELETE_STORE_PROMPT.to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_without_id_or_confirmation_does_nothing() {
        let harness = Harness::signed_in();
        harness.api.insert(store(1, "A", StoreStatus::Draft));
        let view = view(&harness);
        view.mount().await;

        assert_eq!(view.delete_store(None).await, DeleteOutcome::Skipped);
        assert!(harness.confirm.prompts().is_empty());

        harness.confirm.answer(false);
        assert_eq!(
            view.delete_store(Some(StoreId::new(1))).await,
            DeleteOutcome::Declined
        );

        assert_eq!(harness.api.count("delete_store"), 0);
        assert_eq!(view.snapshot().await.stores.len(), 1);
        assert!(harness.notifier.drain().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_state() {
        let harness = Harness::signed_in();
        harness.api.insert(store(1, "A", StoreStatus::Active));
        harness.api.insert(store(2, "B", StoreStatus::Draft));
        harness.api.fail("delete_store");
        let view = view(&harness);
        view.mount().await;

        let outcome = view.delete_store(Some(StoreId::new(1))).await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(view.snapshot().await.summary.total, 2);
        assert_eq!(harness.notifier.drain(), vec![Toast::error("Failed to delete store")]);
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let harness = Harness::signed_in();
        harness.api.insert(store(1, "A", StoreStatus::Active));
        harness.api.insert(store(2, "B", StoreStatus::Draft));
        harness.api.insert(store(3, "C", StoreStatus::Inactive));
        let view = view(&harness);
        view.mount().await;

        let summary = view.snapshot().await.summary;
        assert_eq!((summary.total, summary.active, summary.draft), (3, 1, 1));
        assert_eq!(summary.revenue(), "$0");
    }
}
