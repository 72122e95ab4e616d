//! Interactive confirmation prompts.

/// Prompt shown before deleting a store.
pub const DELETE_STORE_PROMPT: &str = "Are you sure you want to delete this store?";

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation already collected in the browser.
///
/// The delete button carries `hx-confirm`, so a request only reaches the
/// server once the user has accepted the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirmed;

impl Confirm for BrowserConfirmed {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, "confirmed in browser");
        true
    }
}
