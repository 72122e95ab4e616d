//! Headless view models.
//!
//! A view owns its state behind a `tokio::sync::RwLock` and performs its
//! loads through the capabilities in [`ViewContext`]. Views never hold a lock
//! across an API call: they snapshot what they need, release the lock, await
//! the backend and then re-acquire it to apply the result.
//!
//! Stale results are dropped with a [`Lifecycle`]: every load takes a
//! [`LoadTicket`] and only writes back if the view is still mounted and no
//! newer generation has started.

pub mod store_detail;
pub mod store_list;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

pub use store_detail::{AssetKind, DetailDisplay, DetailSnapshot, StatusToggle, StoreDetailView};
pub use store_list::{DeleteOutcome, ListDisplay, ListSnapshot, StoreListView};

use crate::api::StoreApi;
use crate::services::{Confirm, Navigator, Notifier, Route, SessionCapability, SessionState};

/// Collaborators injected into every view.
#[derive(Clone)]
pub struct ViewContext {
    pub session: Arc<dyn SessionCapability>,
    pub api: Arc<dyn StoreApi>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub confirm: Arc<dyn Confirm>,
}

/// Follow-up requested after an optimistic create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// The create response was complete; nothing to do.
    None,
    /// Re-fetch the list after the delay.
    After(Duration),
}

/// Identifies one load so its result can be discarded if superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Mounted flag plus load generation.
#[derive(Debug, Default)]
pub struct Lifecycle {
    mounted: AtomicBool,
    generation: AtomicU64,
}

impl Lifecycle {
    pub fn mount(&self) {
        self.mounted.store(true, Ordering::SeqCst);
    }

    /// Stop accepting results; in-flight loads become stale.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.invalidate();
    }

    /// Start a new generation; in-flight loads become stale.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.load(Ordering::SeqCst))
    }

    /// Whether a load started with `ticket` may still write its result.
    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.is_mounted() && self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

/// Outcome of consulting the session before loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Gate {
    Pending,
    Redirected,
    Open,
}

/// Consult the session; anonymous visitors are sent to the login page.
pub(crate) fn gate(ctx: &ViewContext) -> Gate {
    match ctx.session.state() {
        SessionState::Loading => Gate::Pending,
        SessionState::Anonymous => {
            ctx.navigator.navigate(Route::Login);
            Gate::Redirected
        }
        SessionState::Authenticated(_) => Gate::Open,
    }
}
