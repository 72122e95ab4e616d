//! Integration test support for the StoreMaker dashboard.
//!
//! [`TestApp::spawn`] serves the dashboard router on `127.0.0.1:0` with a
//! [`FakeBackend`] standing in for the StoreMaker API. The client keeps
//! cookies and does not follow redirects, so tests can assert on them.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, Response, redirect::Policy};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use storemaker_core::{
    NewStore, Store, StoreId, StorePatch, StoreStatus, UploadedAsset, UserId, UserProfile,
};
use storemaker_dashboard::api::{
    ApiError, ApiProvider, LoginResponse, SignedOut, StoreApi, StoreFile,
};
use storemaker_dashboard::config::DashboardConfig;
use storemaker_dashboard::state::AppState;

pub const OWNER_EMAIL: &str = "ada@example.com";
pub const OWNER_PASSWORD: &str = "correct horse battery staple";
pub const STOREFRONT_URL: &str = "https://shops.test";
const TOKEN: &str = "test-token";

/// A complete store record as the backend would return it.
#[must_use]
pub fn store(id: i64, name: &str, slug: &str, status: StoreStatus) -> Store {
    Store {
        id: Some(StoreId::new(id)),
        name: name.to_string(),
        slug: Some(slug.to_string()),
        status: Some(status),
        created_at: Some("2024-03-09T10:00:00Z".to_string()),
        ..Store::default()
    }
}

#[must_use]
pub fn owner() -> UserProfile {
    UserProfile {
        id: UserId::new(1),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: OWNER_EMAIL.to_string(),
        role: "store_owner".to_string(),
    }
}

#[derive(Default)]
struct Backend {
    stores: Mutex<Vec<Store>>,
    failing: Mutex<Vec<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
}

/// In-memory StoreMaker API. Clones share state.
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Backend>,
}

impl FakeBackend {
    #[must_use]
    pub fn with_stores(stores: Vec<Store>) -> Self {
        let backend = Self::default();
        *backend.inner.stores.lock().unwrap() = stores;
        backend
    }

    /// Make every call to `operation` fail with a 500.
    pub fn fail(&self, operation: &'static str) {
        self.inner.failing.lock().unwrap().push(operation);
    }

    #[must_use]
    pub fn count(&self, operation: &str) -> usize {
        self.inner
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    #[must_use]
    pub fn stores(&self) -> Vec<Store> {
        self.inner.stores.lock().unwrap().clone()
    }

    fn enter(&self, operation: &'static str) -> Result<(), ApiError> {
        self.inner.calls.lock().unwrap().push(operation);
        if self.inner.failing.lock().unwrap().contains(&operation) {
            return Err(ApiError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(())
    }

    fn modify(&self, id: StoreId, apply: impl FnOnce(&mut Store)) -> Result<Store, ApiError> {
        let mut stores = self.inner.stores.lock().unwrap();
        let store = stores
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or(ApiError::NotFound)?;
        apply(store);
        Ok(store.clone())
    }
}

#[async_trait]
impl ApiProvider for FakeBackend {
    async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        self.enter("login")?;
        if email == OWNER_EMAIL && password.expose_secret() == OWNER_PASSWORD {
            Ok(LoginResponse {
                token: TOKEN.to_string(),
                user: owner(),
            })
        } else {
            Err(ApiError::Unauthorized)
        }
    }

    fn stores_for(&self, token: &str) -> Arc<dyn StoreApi> {
        if token == TOKEN {
            Arc::new(self.clone())
        } else {
            Arc::new(SignedOut)
        }
    }
}

#[async_trait]
impl StoreApi for FakeBackend {
    async fn list_stores(&self) -> Result<Value, ApiError> {
        self.enter("list_stores")?;
        Ok(serde_json::json!({ "data": self.stores() }))
    }

    async fn get_store(&self, id: StoreId) -> Result<Store, ApiError> {
        self.enter("get_store")?;
        self.stores()
            .into_iter()
            .find(|s| s.id == Some(id))
            .ok_or(ApiError::NotFound)
    }

    async fn create_store(&self, payload: &NewStore) -> Result<Store, ApiError> {
        self.enter("create_store")?;
        let mut stores = self.inner.stores.lock().unwrap();
        let id = stores
            .iter()
            .filter_map(|s| s.id.map(|id| id.as_i64()))
            .max()
            .unwrap_or(0)
            + 1;
        let mut created = store(id, &payload.name, payload.slug.as_str(), StoreStatus::Draft);
        created.description.clone_from(&payload.description);
        stores.push(created.clone());
        Ok(created)
    }

    async fn update_store(&self, id: StoreId, patch: &StorePatch) -> Result<Store, ApiError> {
        self.enter("update_store")?;
        self.modify(id, |store| {
            if let Some(status) = patch.status {
                store.status = Some(status);
            }
            if let Some(logo) = &patch.logo {
                store.logo = Some(logo.clone());
            }
            if let Some(favicon) = &patch.favicon {
                store.favicon = Some(favicon.clone());
            }
        })
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), ApiError> {
        self.enter("delete_store")?;
        self.inner
            .stores
            .lock()
            .unwrap()
            .retain(|s| s.id != Some(id));
        Ok(())
    }

    async fn upload_store_logo(
        &self,
        id: StoreId,
        file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        self.enter("upload_store_logo")?;
        Ok(UploadedAsset {
            url: format!("https://cdn.test/stores/{id}/{}", file.file_name),
        })
    }

    async fn upload_store_favicon(
        &self,
        id: StoreId,
        file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        self.enter("upload_store_favicon")?;
        Ok(UploadedAsset {
            url: format!("https://cdn.test/stores/{id}/{}", file.file_name),
        })
    }
}

/// A running dashboard plus a browser-like client.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub backend: FakeBackend,
}

impl TestApp {
    /// Serve the dashboard against `backend` on an ephemeral port.
    pub async fn spawn(backend: FakeBackend) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let config = DashboardConfig::from_lookup(|key| match key {
            "DASHBOARD_BASE_URL" => Some(base_url.clone()),
            "STOREMAKER_API_URL" => Some("http://api.invalid/v1/".to_string()),
            "STOREFRONT_URL" => Some(STOREFRONT_URL.to_string()),
            "DASHBOARD_RECONCILE_DELAY_MS" => Some("1000".to_string()),
            _ => None,
        })
        .unwrap();

        let state = AppState::new(config, Arc::new(backend.clone()));
        let app = storemaker_dashboard::app(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            base_url,
            client,
            backend,
        }
    }

    /// Spawn and sign in as the store owner.
    pub async fn signed_in(backend: FakeBackend) -> Self {
        let app = Self::spawn(backend).await;
        let response = app
            .client
            .post(app.url("/auth/login"))
            .form(&[("email", OWNER_EMAIL), ("password", OWNER_PASSWORD)])
            .send()
            .await
            .unwrap();
        assert_eq!(location(&response).as_deref(), Some("/dashboard"));
        app
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Plain browser navigation.
    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn htmx_get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("HX-Request", "true")
            .send()
            .await
            .unwrap()
    }

    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn htmx_delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .header("HX-Request", "true")
            .send()
            .await
            .unwrap()
    }
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `HX-Redirect` header of an htmx response.
#[must_use]
pub fn hx_redirect(response: &Response) -> Option<String> {
    response
        .headers()
        .get("HX-Redirect")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
