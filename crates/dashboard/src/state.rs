//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ApiProvider;
use crate::config::DashboardConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    api: Arc<dyn ApiProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(config: DashboardConfig, api: Arc<dyn ApiProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Backend access; hand out per-user store APIs with `stores_for`.
    #[must_use]
    pub fn api(&self) -> &Arc<dyn ApiProvider> {
        &self.inner.api
    }
}
