//! Types stored in the dashboard session.

pub mod session;

pub use session::{CurrentUser, keys as session_keys};
