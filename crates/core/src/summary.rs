//! Derived counts over a store collection.

use serde::Serialize;

use crate::types::{Store, StoreStatus};

/// Monthly revenue shown on the dashboard. There is no backing figure yet.
pub const REVENUE_PLACEHOLDER: &str = "$0";

/// Summary statistics shown above the store grid.
///
/// Counting is strict: a store with a missing or unrecognised status is
/// neither active nor draft, even though it is drawn with the draft badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub total: usize,
    pub active: usize,
    pub draft: usize,
}

impl StoreSummary {
    #[must_use]
    pub fn from_stores(stores: &[Store]) -> Self {
        Self {
            total: stores.len(),
            active: count(stores, StoreStatus::Active),
            draft: count(stores, StoreStatus::Draft),
        }
    }

    #[must_use]
    pub const fn revenue(&self) -> &'static str {
        REVENUE_PLACEHOLDER
    }
}

fn count(stores: &[Store], status: StoreStatus) -> usize {
    stores.iter().filter(|s| s.has_status(status)).count()
}
