//! HTTP middleware and extractors for the dashboard.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, clear_current_user, set_current_user};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, store_flash, take_flash};
