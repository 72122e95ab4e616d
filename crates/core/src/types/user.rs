//! Session user profile.

use serde::{Deserialize, Serialize};

use super::UserId;

/// The signed-in store owner, as reported by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl UserProfile {
    fn first_name(&self) -> Option<&str> {
        self.first_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Full name when a first name is known, otherwise the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name(), self.last_name()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_owned(),
            (None, _) => self.email.clone(),
        }
    }

    /// Single uppercase letter for the avatar bubble.
    #[must_use]
    pub fn initial(&self) -> String {
        self.first_name()
            .unwrap_or(self.email.as_str())
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Name used in the topbar greeting.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.first_name().unwrap_or("User")
    }

    /// Role with its first letter capitalised (`store_owner` → `Store owner`).
    #[must_use]
    pub fn role_label(&self) -> String {
        let role = self.role.replace('_', " ");
        let mut chars = role.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}
