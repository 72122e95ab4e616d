//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                            - Health check
//! GET  /                                  - Redirect to the dashboard
//!
//! # Auth
//! GET  /auth/login                        - Login page
//! POST /auth/login                        - Sign in with email and password
//! POST /auth/logout                       - Sign out
//!
//! # Store list
//! GET  /dashboard                         - Shell with loading skeletons
//! GET  /dashboard/panel                   - Summary and store grid (htmx)
//! GET  /dashboard/stores/new              - Create-store modal (htmx)
//! GET  /dashboard/stores/new/cancel       - Close the modal (htmx)
//! POST /dashboard/stores                  - Create a store
//! DELETE /dashboard/stores/{id}           - Delete a store (htmx)
//! POST /dashboard/stores/{id}/delete      - Delete a store (form)
//!
//! # Store detail
//! GET  /dashboard/stores/{id}             - Store detail page
//! POST /dashboard/stores/{id}/activate    - Publish
//! POST /dashboard/stores/{id}/deactivate  - Back to draft
//! POST /dashboard/stores/{id}/logo        - Upload logo (multipart)
//! POST /dashboard/stores/{id}/favicon     - Upload favicon (multipart)
//!
//! # Shell
//! GET  /dashboard/shell/sidebar           - Open the mobile sidebar
//! GET  /dashboard/shell/sidebar/close     - Close it
//! GET  /dashboard/shell/nav/{index}       - Follow a sidebar link
//! ```

pub mod auth;
pub mod dashboard;
pub mod shell;
pub mod stores;
pub mod view;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header},
    response::Redirect,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::create_session_layer;
use crate::services::Route;
use crate::state::AppState;

/// Largest accepted upload body (logo or favicon).
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Directory served under `/static`.
const STATIC_DIR: &str = "crates/dashboard/static";

/// Build the route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        // Auth
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(shell::sign_out))
        // Store list
        .route("/dashboard", get(dashboard::index))
        .route("/dashboard/panel", get(dashboard::panel))
        .route("/dashboard/stores", post(dashboard::create))
        .route("/dashboard/stores/new", get(dashboard::new_store))
        .route("/dashboard/stores/new/cancel", get(dashboard::cancel_new_store))
        .route(
            "/dashboard/stores/{id}",
            get(stores::show).delete(dashboard::destroy),
        )
        .route("/dashboard/stores/{id}/delete", post(dashboard::destroy))
        // Store detail
        .route("/dashboard/stores/{id}/activate", post(stores::activate))
        .route("/dashboard/stores/{id}/deactivate", post(stores::deactivate))
        .route(
            "/dashboard/stores/{id}/logo",
            post(stores::upload_logo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/dashboard/stores/{id}/favicon",
            post(stores::upload_favicon).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Shell
        .route("/dashboard/shell/sidebar", get(shell::open_sidebar))
        .route("/dashboard/shell/sidebar/close", get(shell::close_sidebar))
        .route("/dashboard/shell/nav/{index}", get(shell::navigate))
}

/// Build the complete application: routes, sessions, tracing.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// GET /
async fn root() -> Redirect {
    Redirect::to(&Route::StoreList.path())
}
