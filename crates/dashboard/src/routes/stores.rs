//! Store detail routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path},
    response::{IntoResponse, Response},
};
use storemaker_core::StoreStatus;
use storemaker_core::display::{NO_DOMAIN, status_badge_class};
use tracing::instrument;

use super::view::ViewRequest;
use crate::api::StoreFile;
use crate::components::ShellSnapshot;
use crate::error::AppError;
use crate::filters;
use crate::services::{Route, Toast};
use crate::views::store_detail::StoreStats;
use crate::views::{AssetKind, DetailDisplay, DetailSnapshot, StatusToggle, StoreDetailView};

/// Store fields flattened for the detail templates.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub favicon: Option<String>,
    pub badge_label: &'static str,
    pub badge_class: &'static str,
    pub draft_banner: bool,
    pub toggle: Option<StatusToggle>,
    pub live_href: Option<String>,
    pub store_url: String,
    pub created: String,
    pub builder_href: Option<String>,
    pub stats: StoreStats,
}

impl DetailView {
    fn build(snapshot: &DetailSnapshot, storefront_url: &str) -> Option<Self> {
        let store = snapshot.store.as_ref()?;
        let status = store.visual_status();
        Some(Self {
            id: store.id.map(|id| id.to_string()).unwrap_or_default(),
            name: store.name.clone(),
            description: store.description().map(str::to_owned),
            logo: store.logo().map(str::to_owned),
            favicon: store.favicon().map(str::to_owned),
            badge_label: status.as_str(),
            badge_class: status_badge_class(status),
            draft_banner: snapshot.draft_banner,
            toggle: snapshot.toggle,
            live_href: snapshot.live_link.as_ref().map(|r| r.href(storefront_url)),
            store_url: snapshot
                .store_url
                .clone()
                .unwrap_or_else(|| NO_DOMAIN.to_string()),
            created: snapshot.created.clone(),
            builder_href: snapshot.builder_link.as_ref().map(Route::path),
            stats: snapshot.stats.clone(),
        })
    }

    /// Form action for the status toggle.
    #[must_use]
    pub fn toggle_action(&self) -> String {
        match self.toggle {
            Some(StatusToggle::Deactivate) => format!("/dashboard/stores/{}/deactivate", self.id),
            _ => format!("/dashboard/stores/{}/activate", self.id),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.badge_label == StoreStatus::Active.as_str()
    }
}

/// Full store detail page.
#[derive(Template, WebTemplate)]
#[template(path = "stores/show.html")]
pub struct StoreShowTemplate {
    pub shell: ShellSnapshot,
    pub detail: DetailView,
    pub toasts: Vec<Toast>,
}

/// `#store-detail` after an action.
#[derive(Template, WebTemplate)]
#[template(path = "stores/detail_fragment.html")]
pub struct StoreDetailFragment {
    pub detail: DetailView,
    pub toasts: Vec<Toast>,
}

/// Mount a detail view, returning the redirect if it navigated away.
async fn mounted(req: &ViewRequest, id: String) -> Result<StoreDetailView, Response> {
    let view = StoreDetailView::new(req.context(), id);
    view.mount().await;
    match req.follow_navigation().await {
        Some(redirect) => Err(redirect),
        None => Ok(view),
    }
}

/// Render `#store-detail`, or leave for the list if the store is gone.
async fn detail_response(req: &ViewRequest, view: &StoreDetailView) -> Response {
    if let Some(redirect) = req.follow_navigation().await {
        return redirect;
    }
    let snapshot = view.snapshot().await;
    let Some(detail) = DetailView::build(&snapshot, req.storefront_url()) else {
        return req.redirect(&Route::StoreList).await;
    };

    let fallback = snapshot
        .store
        .as_ref()
        .and_then(|s| s.id)
        .map_or(Route::StoreList, Route::StoreDetail);
    let toasts = req.toasts().await;
    req.action_response(&fallback, StoreDetailFragment { detail, toasts })
        .await
}

/// Store detail page.
///
/// GET /dashboard/stores/{id}
#[instrument(skip(req))]
pub async fn show(req: ViewRequest, Path(id): Path<String>) -> Response {
    let view = match mounted(&req, id).await {
        Ok(view) => view,
        Err(redirect) => return redirect,
    };

    let snapshot = view.snapshot().await;
    let detail = match snapshot.display {
        DetailDisplay::Ready => DetailView::build(&snapshot, req.storefront_url()),
        _ => None,
    };
    let Some(detail) = detail else {
        return req.redirect(&Route::StoreList).await;
    };

    StoreShowTemplate {
        shell: req.shell().snapshot(&Route::StoreList.path()),
        detail,
        toasts: req.toasts().await,
    }
    .into_response()
}

/// POST /dashboard/stores/{id}/activate
#[instrument(skip(req))]
pub async fn activate(req: ViewRequest, Path(id): Path<String>) -> Response {
    let view = match mounted(&req, id).await {
        Ok(view) => view,
        Err(redirect) => return redirect,
    };
    view.activate().await;
    detail_response(&req, &view).await
}

/// POST /dashboard/stores/{id}/deactivate
#[instrument(skip(req))]
pub async fn deactivate(req: ViewRequest, Path(id): Path<String>) -> Response {
    let view = match mounted(&req, id).await {
        Ok(view) => view,
        Err(redirect) => return redirect,
    };
    view.deactivate().await;
    detail_response(&req, &view).await
}

/// POST /dashboard/stores/{id}/logo
#[instrument(skip(req, multipart))]
pub async fn upload_logo(
    req: ViewRequest,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    upload(req, id, AssetKind::Logo, multipart).await
}

/// POST /dashboard/stores/{id}/favicon
#[instrument(skip(req, multipart))]
pub async fn upload_favicon(
    req: ViewRequest,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    upload(req, id, AssetKind::Favicon, multipart).await
}

async fn upload(
    req: ViewRequest,
    id: String,
    kind: AssetKind,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let view = match mounted(&req, id).await {
        Ok(view) => view,
        Err(redirect) => return Ok(redirect),
    };
    let file = read_file(multipart).await?;
    view.upload_asset(kind, file).await;
    Ok(detail_response(&req, &view).await)
}

/// Pull the `file` field out of a multipart body.
async fn read_file(mut multipart: Multipart) -> Result<StoreFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            break;
        }
        return Ok(StoreFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::BadRequest("no file selected".to_string()))
}

#[cfg(test)]
mod tests {
    use storemaker_core::{Store, StoreId};

    use super::*;

    fn snapshot(store: Store) -> DetailSnapshot {
        let status = store.status;
        let active = status == Some(StoreStatus::Active);
        DetailSnapshot {
            display: DetailDisplay::Ready,
            draft_banner: status == Some(StoreStatus::Draft),
            toggle: match status {
                Some(StoreStatus::Draft) => Some(StatusToggle::Activate),
                Some(StoreStatus::Active) => Some(StatusToggle::Deactivate),
                _ => None,
            },
            live_link: store
                .slug()
                .filter(|_| active)
                .map(|s| Route::Storefront(s.to_string())),
            store_url: None,
            created: "5/1/2024".to_string(),
            builder_link: store.id.map(Route::PageBuilder),
            stats: StoreStats::default(),
            store: Some(store),
        }
    }

    fn render(store: Store) -> String {
        let detail = DetailView::build(&snapshot(store), "https://shops.test")
            .unwrap_or_else(|| panic!("store present"));
        StoreDetailFragment {
            detail,
            toasts: vec![Toast::success("Store activated successfully!")],
        }
        .render()
        .unwrap_or_default()
    }

    #[test]
    fn test_draft_store_shows_banner_and_activate() {
        let mut store = crate::testing::store(4, "Candles", StoreStatus::Draft);
        store.slug = Some("candles".to_string());
        let html = render(store);

        assert!(html.contains("Store is in Draft Mode"));
        assert!(html.contains("Activate Store"));
        assert!(html.contains("/dashboard/stores/4/activate"));
        assert!(!html.contains("View Store"));
        assert!(html.contains(NO_DOMAIN));
        assert!(html.contains("/dashboard/stores/4/builder"));
    }

    #[test]
    fn test_active_store_shows_live_link_and_deactivate() {
        let mut store = crate::testing::store(4, "Candles", StoreStatus::Active);
        store.slug = Some("candles".to_string());
        let html = render(store);

        assert!(!html.contains("Store is in Draft Mode"));
        assert!(html.contains("Deactivate Store"));
        assert!(html.contains("https://shops.test/stores/candles"));
        assert!(html.contains("Store activated successfully!"));
    }

    #[test]
    fn test_toggle_action() {
        let store = crate::testing::store(9, "Tea", StoreStatus::Active);
        let detail = DetailView::build(&snapshot(store), "").unwrap_or_else(|| panic!("store"));
        assert_eq!(detail.toggle_action(), "/dashboard/stores/9/deactivate");
        assert!(detail.is_active());
        assert_eq!(detail.id, StoreId::new(9).to_string());
    }
}
