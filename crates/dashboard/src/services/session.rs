//! Session capability consulted by the views.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use storemaker_core::UserProfile;
use tower_sessions::Session;

use crate::middleware::clear_current_user;

/// What the views know about the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Not resolved yet; views wait without fetching.
    Loading,
    /// No signed-in user; views send the visitor to the login page.
    Anonymous,
    Authenticated(UserProfile),
}

#[async_trait]
pub trait SessionCapability: Send + Sync {
    fn state(&self) -> SessionState;

    /// End the session. Never fails from the caller's point of view.
    async fn logout(&self);
}

/// [`SessionCapability`] backed by the request's `tower-sessions` session.
///
/// The user is read once when the request is extracted, so `state()` is
/// never `Loading`.
pub struct HttpSession {
    session: Session,
    user: RwLock<Option<UserProfile>>,
}

impl HttpSession {
    #[must_use]
    pub fn new(session: Session, user: Option<UserProfile>) -> Self {
        Self {
            session,
            user: RwLock::new(user),
        }
    }
}

#[async_trait]
impl SessionCapability for HttpSession {
    fn state(&self) -> SessionState {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .map_or(SessionState::Anonymous, SessionState::Authenticated)
    }

    async fn logout(&self) {
        if let Err(e) = clear_current_user(&self.session).await {
            tracing::warn!(error = %e, "Failed to clear session user");
        }
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        crate::error::clear_sentry_user();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use storemaker_core::UserId;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::models::{CurrentUser, session_keys};

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            first_name: Some("Ada".to_string()),
            last_name: None,
            email: "ada@example.com".to_string(),
            role: "store_owner".to_string(),
        }
    }

    #[tokio::test]
    async fn test_state_reflects_user() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert_eq!(
            HttpSession::new(session.clone(), None).state(),
            SessionState::Anonymous
        );
        assert_eq!(
            HttpSession::new(session, Some(profile())).state(),
            SessionState::Authenticated(profile())
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session_user() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let user = CurrentUser {
            profile: profile(),
            access_token: "tok".to_string(),
        };
        session
            .insert(session_keys::CURRENT_USER, &user)
            .await
            .unwrap();

        let capability = HttpSession::new(session.clone(), Some(profile()));
        capability.logout().await;

        assert_eq!(capability.state(), SessionState::Anonymous);
        let stored: Option<CurrentUser> = session.get(session_keys::CURRENT_USER).await.unwrap();
        assert!(stored.is_none());
    }
}
