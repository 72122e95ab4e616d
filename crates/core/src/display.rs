//! Presentation helpers for store records.
//!
//! These never fail: malformed backend values degrade to placeholder text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::{Store, StoreStatus};

/// Platform domain that hosts every store's default subdomain.
pub const PLATFORM_DOMAIN: &str = "storemaker.com";

/// Shown when a store has no slug, domain or subdomain.
pub const NO_DOMAIN: &str = "No domain set";

/// Shown when a store has no description.
pub const NO_DESCRIPTION: &str = "No description provided";

/// Shown when a creation timestamp is missing.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Shown when a creation timestamp cannot be parsed.
pub const INVALID_DATE: &str = "Invalid date";

/// Format a raw creation timestamp as `M/D/YYYY` (UTC).
///
/// Accepts RFC 3339 (`2024-03-05T10:00:00Z`), naive date-times with or
/// without fractional seconds (treated as UTC) and plain dates.
///
/// ```
/// use storemaker_core::display::format_created_date;
///
/// assert_eq!(format_created_date(Some("2024-03-05T10:00:00Z")), "3/5/2024");
/// assert_eq!(format_created_date(None), "Unknown date");
/// assert_eq!(format_created_date(Some("yesterday")), "Invalid date");
/// ```
#[must_use]
pub fn format_created_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_DATE.to_owned();
    };
    parse_timestamp(raw).map_or_else(
        || INVALID_DATE.to_owned(),
        |ts| ts.format("%-m/%-d/%Y").to_string(),
    )
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Domain line shown on a store card.
///
/// Precedence: `{slug}.storemaker.com`, custom domain, subdomain, then
/// [`NO_DOMAIN`].
#[must_use]
pub fn domain_display(store: &Store) -> String {
    if let Some(slug) = store.slug() {
        return format!("{slug}.{PLATFORM_DOMAIN}");
    }
    store
        .domain()
        .or_else(|| store.subdomain())
        .unwrap_or(NO_DOMAIN)
        .to_owned()
}

/// Address shown on the detail page: the custom domain, otherwise the
/// platform subdomain. `None` when neither is set.
#[must_use]
pub fn store_url(store: &Store) -> Option<String> {
    store.domain().map(str::to_owned).or_else(|| {
        store
            .subdomain()
            .map(|sub| format!("{sub}.{PLATFORM_DOMAIN}"))
    })
}

/// Tailwind classes for a status badge.
#[must_use]
pub const fn status_badge_class(status: StoreStatus) -> &'static str {
    match status {
        StoreStatus::Active => {
            "bg-green-100 text-green-800 dark:bg-green-900/20 dark:text-green-400"
        }
        StoreStatus::Inactive => "bg-red-100 text-red-800 dark:bg-red-900/20 dark:text-red-400",
        StoreStatus::Draft | StoreStatus::Unrecognized => {
            "bg-yellow-100 text-yellow-800 dark:bg-yellow-900/20 dark:text-yellow-400"
        }
    }
}

#[must_use]
pub fn description_or_placeholder(store: &Store) -> &str {
    store.description().unwrap_or(NO_DESCRIPTION)
}
