//! Store list routes: the dashboard home, its htmx panel and store
//! create/delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderName, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use storemaker_core::{NewStore, StoreId, StoreSummary};
use tracing::instrument;

use super::view::ViewRequest;
use crate::components::{ShellSnapshot, StoreCard, StoreCardView};
use crate::filters;
use crate::services::confirm::DELETE_STORE_PROMPT;
use crate::services::{Route, Toast};
use crate::state::AppState;
use crate::views::{ListDisplay, ListSnapshot, Reconcile, StoreListView};

/// Dashboard home: shell plus loading skeletons; the panel loads itself.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub shell: ShellSnapshot,
    pub toasts: Vec<Toast>,
}

/// `#store-panel`: summary cards plus grid or empty state.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/panel.html")]
pub struct PanelTemplate {
    pub summary: StoreSummary,
    pub cards: Vec<StoreCardView>,
    pub empty: bool,
    pub delete_prompt: &'static str,
    /// Delay before the panel re-fetches itself.
    pub reconcile_ms: Option<u128>,
    /// Clear `#modal` out of band.
    pub close_modal: bool,
    pub toasts: Vec<Toast>,
}

/// Create-store modal, rendered into `#modal`.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/create_modal.html")]
pub struct CreateModalTemplate {
    pub form: CreateStoreForm,
    pub error: Option<String>,
    pub toasts: Vec<Toast>,
}

/// Create-store form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStoreForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
}

impl PanelTemplate {
    fn build(snapshot: ListSnapshot, storefront_url: &str, toasts: Vec<Toast>) -> Self {
        Self {
            cards: snapshot
                .stores
                .iter()
                .map(|store| StoreCard::new(store).view(storefront_url))
                .collect(),
            empty: snapshot.display == ListDisplay::Empty,
            summary: snapshot.summary,
            delete_prompt: DELETE_STORE_PROMPT,
            reconcile_ms: None,
            close_modal: false,
            toasts,
        }
    }

    fn reconcile(mut self, reconcile: Reconcile) -> Self {
        if let Reconcile::After(delay) = reconcile {
            self.reconcile_ms = Some(delay.as_millis());
        }
        self
    }
}

fn list_view(req: &ViewRequest, state: &AppState) -> StoreListView {
    StoreListView::new(req.context(), state.config().reconcile_delay)
}

/// Re-target an htmx response at the modal.
fn into_modal(template: CreateModalTemplate) -> Response {
    (
        [
            (HeaderName::from_static("hx-retarget"), HeaderValue::from_static("#modal")),
            (HeaderName::from_static("hx-reswap"), HeaderValue::from_static("innerHTML")),
        ],
        template,
    )
        .into_response()
}

/// Dashboard home.
///
/// GET /dashboard
#[instrument(skip(req, state))]
pub async fn index(req: ViewRequest, State(state): State<AppState>) -> Response {
    let view = list_view(&req, &state);
    view.check_session().await;
    if let Some(redirect) = req.follow_navigation().await {
        return redirect;
    }

    DashboardTemplate {
        shell: req.shell().snapshot(&Route::StoreList.path()),
        toasts: req.toasts().await,
    }
    .into_response()
}

/// Store panel, loaded by the dashboard page and by reconcile triggers.
///
/// GET /dashboard/panel
#[instrument(skip(req, state))]
pub async fn panel(req: ViewRequest, State(state): State<AppState>) -> Response {
    let view = list_view(&req, &state);
    view.mount().await;
    if let Some(redirect) = req.follow_navigation().await {
        return redirect;
    }

    let toasts = req.toasts().await;
    PanelTemplate::build(view.snapshot().await, req.storefront_url(), toasts).into_response()
}

/// Open the create-store modal.
///
/// GET /dashboard/stores/new
#[instrument(skip(req, state))]
pub async fn new_store(req: ViewRequest, State(state): State<AppState>) -> Response {
    let view = list_view(&req, &state);
    view.check_session().await;
    if let Some(redirect) = req.follow_navigation().await {
        return redirect;
    }
    view.open_create_modal().await;

    CreateModalTemplate {
        form: CreateStoreForm::default(),
        error: None,
        toasts: Vec::new(),
    }
    .into_response()
}

/// Close the create-store modal.
///
/// GET /dashboard/stores/new/cancel
pub async fn cancel_new_store() -> Html<&'static str> {
    Html("")
}

/// Create a store.
///
/// POST /dashboard/stores
///
/// Invalid input re-renders the modal without calling the backend. A
/// backend failure keeps the modal open with the entered values.
#[instrument(skip(req, state, form), fields(slug = %form.slug))]
pub async fn create(
    req: ViewRequest,
    State(state): State<AppState>,
    Form(form): Form<CreateStoreForm>,
) -> Response {
    let payload = match NewStore::from_input(&form.name, &form.description, &form.slug) {
        Ok(payload) => payload,
        Err(e) => {
            if !req.is_htmx() {
                req.push_toast(Toast::error(e.to_string()));
                return req.redirect(&Route::StoreList).await;
            }
            return into_modal(CreateModalTemplate {
                form,
                error: Some(e.to_string()),
                toasts: Vec::new(),
            });
        }
    };

    let view = list_view(&req, &state);
    view.mount().await;
    if let Some(redirect) = req.follow_navigation().await {
        return redirect;
    }
    view.open_create_modal().await;

    match view.create_store(payload).await {
        Ok(reconcile) => {
            let toasts = req.toasts().await;
            let snapshot = view.snapshot().await;
            let close_modal = !snapshot.modal_open;
            let mut panel =
                PanelTemplate::build(snapshot, req.storefront_url(), toasts).reconcile(reconcile);
            panel.close_modal = close_modal;
            req.action_response(&Route::StoreList, panel).await
        }
        Err(_) => {
            if !req.is_htmx() {
                return req.redirect(&Route::StoreList).await;
            }
            into_modal(CreateModalTemplate {
                form,
                error: None,
                toasts: req.toasts().await,
            })
        }
    }
}

/// Delete a store. The browser has already asked for confirmation.
///
/// DELETE /dashboard/stores/{id}
/// POST   /dashboard/stores/{id}/delete
#[instrument(skip(req, state))]
pub async fn destroy(
    req: ViewRequest,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let view = list_view(&req, &state);
    view.mount().await;
    if let Some(redirect) = req.follow_navigation().await {
        return redirect;
    }

    let outcome = view.delete_store(id.parse::<StoreId>().ok()).await;
    tracing::debug!(?outcome, "delete finished");

    let toasts = req.toasts().await;
    let panel = PanelTemplate::build(view.snapshot().await, req.storefront_url(), toasts);
    req.action_response(&Route::StoreList, panel).await
}
