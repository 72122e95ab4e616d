//! Request-scoped wiring between axum and the headless views.
//!
//! [`ViewRequest`] builds the capabilities a view needs for one request and
//! turns what the view asked for (navigation, toasts) into an HTTP response:
//! `HX-Redirect` for htmx requests, a 303 otherwise. Toasts raised before a
//! redirect travel in the session and show up on the next page.
//!
//! Whether the create modal or the mobile sidebar is open lives in the DOM,
//! so their close endpoints only return an empty swap. A delayed reconcile
//! is likewise the `load delay` panel reload rendered by `panel.html`. The
//! matching view-model methods (`StoreListView::close_create_modal`,
//! `Shell::close`, `Shell::backdrop_click`, `StoreListView::reconcile`) are
//! the headless side of those interactions and are driven by unit tests.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::api::{SignedOut, StoreApi};
use crate::components::Shell;
use crate::error::AppError;
use crate::middleware::{auth::current_user, store_flash, take_flash};
use crate::models::CurrentUser;
use crate::services::{
    BrowserConfirmed, HttpSession, Notifier, RecordingNavigator, Route, Toast, ToastBuffer,
};
use crate::state::AppState;
use crate::views::ViewContext;

/// htmx request marker header.
pub const HX_REQUEST: &str = "HX-Request";

/// Everything a handler needs to drive a view for one request.
pub struct ViewRequest {
    session: Session,
    user: Option<CurrentUser>,
    htmx: bool,
    api: Arc<dyn StoreApi>,
    toasts: Arc<ToastBuffer>,
    navigator: Arc<RecordingNavigator>,
    http_session: Arc<HttpSession>,
    storefront_url: String,
}

/// Whether the request was issued by htmx.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .is_some_and(|value| value.as_bytes() == b"true")
}

impl FromRequestParts<AppState> for ViewRequest {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let user = current_user(&session).await;
        let api: Arc<dyn StoreApi> = match &user {
            Some(user) => state.api().stores_for(&user.access_token),
            None => Arc::new(SignedOut),
        };
        let http_session = Arc::new(HttpSession::new(
            session.clone(),
            user.as_ref().map(|u| u.profile.clone()),
        ));

        Ok(Self {
            htmx: is_htmx(&parts.headers),
            session,
            user,
            api,
            toasts: Arc::new(ToastBuffer::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            http_session,
            storefront_url: state.config().storefront_url.clone(),
        })
    }
}

impl ViewRequest {
    /// Capabilities for a view handling this request.
    #[must_use]
    pub fn context(&self) -> ViewContext {
        ViewContext {
            session: self.http_session.clone(),
            api: self.api.clone(),
            notifier: self.toasts.clone(),
            navigator: self.navigator.clone(),
            // the browser already confirmed through hx-confirm
            confirm: Arc::new(BrowserConfirmed),
        }
    }

    #[must_use]
    pub fn shell(&self) -> Shell {
        Shell::new(self.http_session.clone(), self.navigator.clone())
    }

    #[must_use]
    pub const fn is_htmx(&self) -> bool {
        self.htmx
    }

    #[must_use]
    pub const fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn storefront_url(&self) -> &str {
        &self.storefront_url
    }

    /// Raise a toast outside of a view.
    pub fn push_toast(&self, toast: Toast) {
        self.toasts.notify(toast);
    }

    /// Navigation requested by the view, if any.
    #[must_use]
    pub fn pending_navigation(&self) -> Option<Route> {
        self.navigator.take()
    }

    /// Send the browser to `route`, carrying this request's toasts along.
    pub async fn redirect(&self, route: &Route) -> Response {
        if let Err(e) = store_flash(&self.session, self.toasts.drain()).await {
            tracing::warn!(error = %e, "Failed to store flash toasts");
        }

        let href = route.href(&self.storefront_url);
        if self.htmx {
            (StatusCode::OK, [("HX-Redirect", href)]).into_response()
        } else {
            Redirect::to(&href).into_response()
        }
    }

    /// Redirect if the view asked to navigate.
    pub async fn follow_navigation(&self) -> Option<Response> {
        let route = self.pending_navigation()?;
        Some(self.redirect(&route).await)
    }

    /// Toasts to render now: those flashed by an earlier redirect, then the
    /// ones raised during this request.
    pub async fn toasts(&self) -> Vec<Toast> {
        let mut toasts = take_flash(&self.session).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read flash toasts");
            Vec::new()
        });
        toasts.extend(self.toasts.drain());
        toasts
    }

    /// Respond to a form action: the fragment for htmx, otherwise a
    /// redirect to `fallback` with the toasts flashed.
    pub async fn action_response<F>(&self, fallback: &Route, fragment: F) -> Response
    where
        F: IntoResponse,
    {
        if self.htmx {
            fragment.into_response()
        } else {
            self.redirect(fallback).await
        }
    }
}
