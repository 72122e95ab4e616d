//! Dashboard shell routes: mobile sidebar and sign-out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::view::ViewRequest;
use crate::components::ShellSnapshot;
use crate::components::shell::navigation;
use crate::error::AppError;
use crate::services::Route;

/// Mobile sidebar drawer, rendered into `#mobile-sidebar`.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/sidebar.html")]
pub struct SidebarTemplate {
    pub shell: ShellSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct CloseQuery {
    /// `backdrop` when the click landed outside the drawer.
    #[serde(default)]
    pub source: Option<String>,
}

/// GET /dashboard/shell/sidebar
#[instrument(skip(req))]
pub async fn open_sidebar(req: ViewRequest) -> Response {
    let shell = req.shell();
    shell.open();
    SidebarTemplate {
        shell: shell.snapshot(&Route::StoreList.path()),
    }
    .into_response()
}

/// GET /dashboard/shell/sidebar/close
pub async fn close_sidebar(Query(query): Query<CloseQuery>) -> Html<&'static str> {
    tracing::debug!(source = query.source.as_deref().unwrap_or("button"), "closing sidebar");
    Html("")
}

/// Follow a sidebar entry by position.
///
/// GET /dashboard/shell/nav/{index}
#[instrument(skip(req))]
pub async fn navigate(req: ViewRequest, Path(index): Path<usize>) -> Result<Response, AppError> {
    let items = navigation();
    let item = items
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("navigation item {index}")))?;

    let shell = req.shell();
    shell.navigate(item);
    Ok(req
        .follow_navigation()
        .await
        .unwrap_or_else(|| Html("").into_response()))
}

/// End the session and return to the site root.
///
/// POST /auth/logout
#[instrument(skip(req))]
pub async fn sign_out(req: ViewRequest) -> Response {
    if let Some(user) = req.user() {
        tracing::info!(user_id = %user.profile.id, "Signing out");
    }
    req.shell().sign_out().await;
    req.follow_navigation()
        .await
        .unwrap_or_else(|| Html("").into_response())
}
