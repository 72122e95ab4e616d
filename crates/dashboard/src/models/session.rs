//! Session-related types for dashboard authentication.

use serde::{Deserialize, Serialize};
use storemaker_core::UserProfile;

/// Session-stored identity of the signed-in store owner.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Profile returned by the backend at login.
    pub profile: UserProfile,
    /// Bearer token for StoreMaker API calls.
    pub access_token: String,
}

impl std::fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUser")
            .field("profile", &self.profile)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Session keys for dashboard data.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for toasts carried across a redirect.
    pub const FLASH_TOASTS: &str = "flash_toasts";
}
