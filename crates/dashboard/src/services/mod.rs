//! Capabilities injected into the view models.
//!
//! Each capability is a trait so views can run against the HTTP adapter in
//! production and against recording fakes in tests.

pub mod confirm;
pub mod navigation;
pub mod notify;
pub mod session;

pub use confirm::{BrowserConfirmed, Confirm};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use notify::{Notifier, Toast, ToastBuffer, ToastLevel};
pub use session::{HttpSession, SessionCapability, SessionState};
