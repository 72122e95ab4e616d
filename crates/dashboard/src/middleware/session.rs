//! Session middleware configuration for the dashboard.
//!
//! Sessions live in memory (tower-sessions `MemoryStore`) with SameSite=Lax
//! cookies and a 24 hour inactivity expiry. Besides the signed-in user, the
//! session carries "flash" toasts across a redirect.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::DashboardConfig;
use crate::models::session_keys;
use crate::services::Toast;

/// Session cookie name for the dashboard.
pub const SESSION_COOKIE_NAME: &str = "storemaker_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &DashboardConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        // Lax so the login redirect back into the dashboard keeps the cookie
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Append toasts to be shown on the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn store_flash(
    session: &Session,
    toasts: Vec<Toast>,
) -> Result<(), tower_sessions::session::Error> {
    if toasts.is_empty() {
        return Ok(());
    }
    let mut pending = session
        .get::<Vec<Toast>>(session_keys::FLASH_TOASTS)
        .await?
        .unwrap_or_default();
    pending.extend(toasts);
    session.insert(session_keys::FLASH_TOASTS, pending).await
}

/// Remove and return the pending flash toasts.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn take_flash(session: &Session) -> Result<Vec<Toast>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<Toast>>(session_keys::FLASH_TOASTS)
        .await?
        .unwrap_or_default())
}
