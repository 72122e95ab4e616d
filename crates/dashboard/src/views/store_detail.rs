//! Store detail view: overview and management of a single store.

use storemaker_core::display::{format_created_date, store_url};
use storemaker_core::{Store, StoreId, StorePatch, StoreStatus};
use tokio::sync::RwLock;
use tracing::instrument;

use super::{Gate, Lifecycle, ViewContext, gate};
use crate::api::{ApiError, StoreFile};
use crate::services::Route;

/// What the detail page should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailDisplay {
    SessionPending,
    Redirected,
    /// Spinner while the store loads.
    Loading,
    /// The store loaded.
    Ready,
    /// No store to show (the view has navigated away).
    Missing,
}

/// The status action offered for the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusToggle {
    Activate,
    Deactivate,
}

impl StatusToggle {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Activate => "Activate Store",
            Self::Deactivate => "Deactivate Store",
        }
    }
}

/// Branding asset kinds that can be uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    Favicon,
}

impl AssetKind {
    fn patch(self, url: String) -> StorePatch {
        match self {
            Self::Logo => StorePatch::logo(url),
            Self::Favicon => StorePatch::favicon(url),
        }
    }

    const fn success_message(self) -> &'static str {
        match self {
            Self::Logo => "Logo updated",
            Self::Favicon => "Favicon updated",
        }
    }

    const fn failure_message(self) -> &'static str {
        match self {
            Self::Logo => "Failed to upload logo",
            Self::Favicon => "Failed to upload favicon",
        }
    }
}

/// Placeholder statistics shown until the backend reports real figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub products: u32,
    pub orders: u32,
    pub revenue: &'static str,
    pub visitors: u32,
}

impl Default for StoreStats {
    fn default() -> Self {
        Self {
            products: 0,
            orders: 0,
            revenue: "$0.00",
            visitors: 0,
        }
    }
}

#[derive(Debug)]
struct DetailState {
    store: Option<Store>,
    loading: bool,
    session_pending: bool,
    redirected: bool,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            store: None,
            loading: true,
            session_pending: false,
            redirected: false,
        }
    }
}

/// Read-only copy of the detail view's state with everything derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSnapshot {
    pub display: DetailDisplay,
    pub store: Option<Store>,
    pub draft_banner: bool,
    pub toggle: Option<StatusToggle>,
    /// Public storefront, only for active stores with a slug.
    pub live_link: Option<Route>,
    pub store_url: Option<String>,
    pub created: String,
    pub builder_link: Option<Route>,
    pub stats: StoreStats,
}

pub struct StoreDetailView {
    ctx: ViewContext,
    route_id: RwLock<String>,
    state: RwLock<DetailState>,
    lifecycle: Lifecycle,
}

impl StoreDetailView {
    /// Create a view for the raw `{id}` route parameter.
    #[must_use]
    pub fn new(ctx: ViewContext, route_id: impl Into<String>) -> Self {
        Self {
            ctx,
            route_id: RwLock::new(route_id.into()),
            state: RwLock::new(DetailState::default()),
            lifecycle: Lifecycle::default(),
        }
    }

    /// Mount the view: gate on the session, then load the store.
    pub async fn mount(&self) {
        self.lifecycle.mount();
        let gate = gate(&self.ctx);
        {
            let mut state = self.state.write().await;
            state.session_pending = gate == Gate::Pending;
            state.redirected = gate == Gate::Redirected;
            if state.redirected {
                state.loading = false;
            }
        }
        if gate == Gate::Open {
            self.fetch_store().await;
        }
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    /// Switch to another store; loads still in flight for the old id are
    /// dropped.
    pub async fn set_route_id(&self, raw: impl Into<String>) {
        self.lifecycle.invalidate();
        *self.route_id.write().await = raw.into();
        if self.lifecycle.is_mounted() && !self.state.read().await.redirected {
            self.fetch_store().await;
        }
    }

    /// The parsed route id, if it is numeric.
    pub async fn store_id(&self) -> Option<StoreId> {
        self.route_id.read().await.parse().ok()
    }

    #[instrument(skip(self))]
    pub async fn fetch_store(&self) {
        let ticket = self.lifecycle.begin();
        let raw = self.route_id.read().await.clone();

        let Ok(id) = raw.parse::<StoreId>() else {
            tracing::warn!(route_id = %raw, "Non-numeric store id");
            self.load_failed().await;
            return;
        };

        self.state.write().await.loading = true;
        let result = self.ctx.api.get_store(id).await;

        if !self.lifecycle.is_current(ticket) {
            tracing::debug!(store_id = %id, "discarding stale store");
            return;
        }

        match result {
            Ok(store) => {
                let mut state = self.state.write().await;
                state.store = Some(store);
                state.loading = false;
            }
            Err(e) => {
                tracing::error!(error = %e, store_id = %id, "Failed to fetch store");
                self.load_failed().await;
            }
        }
    }

    async fn load_failed(&self) {
        {
            let mut state = self.state.write().await;
            state.store = None;
            state.loading = false;
        }
        self.ctx.notifier.error("Failed to load store");
        self.ctx.navigator.navigate(Route::StoreList);
    }

    /// Publish the store.
    pub async fn activate(&self) -> bool {
        self.set_status(
            StoreStatus::Active,
            "Store activated successfully!",
            "Failed to activate store",
        )
        .await
    }

    /// Take the store back to draft.
    pub async fn deactivate(&self) -> bool {
        self.set_status(
            StoreStatus::Draft,
            "Store deactivated successfully!",
            "Failed to deactivate store",
        )
        .await
    }

    #[instrument(skip(self, success, failure))]
    async fn set_status(&self, status: StoreStatus, success: &str, failure: &str) -> bool {
        let Some(id) = self.store_id().await else {
            return false;
        };

        match self.ctx.api.update_store(id, &StorePatch::status(status)).await {
            Ok(_) => {
                self.ctx.notifier.success(success);
                self.fetch_store().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, store_id = %id, "Failed to update store status");
                self.ctx.notifier.error(failure);
                false
            }
        }
    }

    pub async fn upload_logo(&self, file: StoreFile) -> bool {
        self.upload_asset(AssetKind::Logo, file).await
    }

    pub async fn upload_favicon(&self, file: StoreFile) -> bool {
        self.upload_asset(AssetKind::Favicon, file).await
    }

    /// Upload an asset and persist its URL on the store.
    ///
    /// The two steps are not atomic: a failed persist leaves the uploaded
    /// file in place.
    #[instrument(skip(self, file), fields(file = %file.file_name))]
    pub async fn upload_asset(&self, kind: AssetKind, file: StoreFile) -> bool {
        let Some(id) = self.store_id().await else {
            return false;
        };

        let result: Result<Store, ApiError> = async {
            let asset = match kind {
                AssetKind::Logo => self.ctx.api.upload_store_logo(id, file).await?,
                AssetKind::Favicon => self.ctx.api.upload_store_favicon(id, file).await?,
            };
            self.ctx.api.update_store(id, &kind.patch(asset.url)).await
        }
        .await;

        match result {
            Ok(_) => {
                self.ctx.notifier.success(kind.success_message());
                self.fetch_store().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, store_id = %id, ?kind, "Failed to upload asset");
                self.ctx.notifier.error(kind.failure_message());
                false
            }
        }
    }

    pub async fn snapshot(&self) -> DetailSnapshot {
        let state = self.state.read().await;
        let display = if state.session_pending {
            DetailDisplay::SessionPending
        } else if state.redirected {
            DetailDisplay::Redirected
        } else if state.loading {
            DetailDisplay::Loading
        } else if state.store.is_some() {
            DetailDisplay::Ready
        } else {
            DetailDisplay::Missing
        };

        let store = state.store.clone();
        let status = store.as_ref().and_then(|s| s.status);
        let toggle = match status {
            Some(StoreStatus::Draft) => Some(StatusToggle::Activate),
            Some(StoreStatus::Active) => Some(StatusToggle::Deactivate),
            _ => None,
        };
        let live_link = store
            .as_ref()
            .filter(|s| s.has_status(StoreStatus::Active))
            .and_then(Store::slug)
            .map(|slug| Route::Storefront(slug.to_owned()));

        DetailSnapshot {
            display,
            draft_banner: status == Some(StoreStatus::Draft),
            toggle,
            live_link,
            store_url: store.as_ref().and_then(store_url),
            created: format_created_date(store.as_ref().and_then(Store::created_at)),
            builder_link: store.as_ref().and_then(|s| s.id).map(Route::PageBuilder),
            stats: StoreStats::default(),
            store,
        }
    }
}
