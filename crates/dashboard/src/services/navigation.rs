//! Typed navigation targets.

use std::sync::{Mutex, PoisonError};

use storemaker_core::StoreId;

/// A place in the dashboard (or outside it) a view can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Site root.
    Root,
    Login,
    /// The store list.
    StoreList,
    StoreDetail(StoreId),
    /// Public storefront of an active store, by slug.
    Storefront(String),
    /// Visual page builder, served by a separate application.
    PageBuilder(StoreId),
}

impl Route {
    /// Path of the route, relative to its origin.
    ///
    /// ```
    /// use storemaker_core::StoreId;
    /// use storemaker_dashboard::services::Route;
    ///
    /// assert_eq!(Route::StoreDetail(StoreId::new(3)).path(), "/dashboard/stores/3");
    /// assert_eq!(Route::Storefront("acme".into()).path(), "/stores/acme");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/auth/login".to_string(),
            Self::StoreList => "/dashboard".to_string(),
            Self::StoreDetail(id) => format!("/dashboard/stores/{id}"),
            Self::Storefront(slug) => format!("/stores/{slug}"),
            Self::PageBuilder(id) => format!("/dashboard/stores/{id}/builder"),
        }
    }

    /// Full link for the route. Storefront links are prefixed with the
    /// configured storefront origin; everything else stays relative.
    #[must_use]
    pub fn href(&self, storefront_url: &str) -> String {
        match self {
            Self::Storefront(_) => format!("{storefront_url}{}", self.path()),
            _ => self.path(),
        }
    }
}

/// Receives navigation requests from the views.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Remembers the last requested route so the HTTP layer can turn it into a
/// redirect once the view is done.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    target: Mutex<Option<Route>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending navigation, if any.
    pub fn take(&self) -> Option<Route> {
        self.target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route.path(), "navigation requested");
        *self.target.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}
