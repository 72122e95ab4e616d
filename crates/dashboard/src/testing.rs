//! In-memory fakes for the injected capabilities.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use storemaker_core::{NewStore, Store, StoreId, StorePatch, StoreStatus, UploadedAsset, UserId, UserProfile};

use secrecy::SecretString;

use crate::api::{ApiError, ApiProvider, LoginResponse, StoreApi, StoreFile};
use crate::config::DashboardConfig;
use crate::services::{
    Confirm, Notifier, RecordingNavigator, SessionCapability, SessionState, ToastBuffer,
};
use crate::views::ViewContext;

/// A complete store record.
pub fn store(id: i64, name: &str, status: StoreStatus) -> Store {
    Store {
        id: Some(StoreId::new(id)),
        name: name.to_string(),
        status: Some(status),
        created_at: Some("2024-05-01T12:00:00Z".to_string()),
        ..Store::default()
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: UserId::new(1),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: "ada@example.com".to_string(),
        role: "store_owner".to_string(),
    }
}

/// Minimal configuration for router tests.
pub fn config() -> DashboardConfig {
    DashboardConfig::from_lookup(|key| match key {
        "DASHBOARD_BASE_URL" => Some("http://localhost:3000".to_string()),
        "STOREMAKER_API_URL" => Some("http://api.test/v1/".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Backend fake holding stores in memory and recording every call.
#[derive(Default)]
pub struct FakeApi {
    stores: Mutex<Vec<Store>>,
    list_body: Mutex<Option<Value>>,
    create_response: Mutex<Option<Store>>,
    failing: Mutex<Vec<&'static str>>,
    get_delays: Mutex<HashMap<StoreId, Duration>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    pub fn insert(&self, store: Store) {
        self.stores.lock().unwrap().push(store);
    }

    /// Serve this body from `list_stores` instead of the stored records.
    pub fn set_list_body(&self, body: Value) {
        *self.list_body.lock().unwrap() = Some(body);
    }

    pub fn set_create_response(&self, store: Store) {
        *self.create_response.lock().unwrap() = Some(store);
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().push(operation);
    }

    pub fn delay_get(&self, id: StoreId, delay: Duration) {
        self.get_delays.lock().unwrap().insert(id, delay);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| **c == operation).count()
    }

    fn enter(&self, operation: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(ApiError::Status {
                status: 500,
                body: format!("{operation} failed"),
            });
        }
        Ok(())
    }

    fn find(&self, id: StoreId) -> Result<Store, ApiError> {
        self.stores
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == Some(id))
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    fn asset(id: StoreId, name: &str) -> UploadedAsset {
        UploadedAsset {
            url: format!("https://cdn.test/stores/{id}/{name}"),
        }
    }
}

#[async_trait]
impl StoreApi for FakeApi {
    async fn list_stores(&self) -> Result<Value, ApiError> {
        self.enter("list_stores")?;
        if let Some(body) = self.list_body.lock().unwrap().clone() {
            return Ok(body);
        }
        Ok(serde_json::to_value(&*self.stores.lock().unwrap())?)
    }

    async fn get_store(&self, id: StoreId) -> Result<Store, ApiError> {
        self.enter("get_store")?;
        let delay = self.get_delays.lock().unwrap().get(&id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.find(id)
    }

    async fn create_store(&self, payload: &NewStore) -> Result<Store, ApiError> {
        self.enter("create_store")?;
        if let Some(store) = self.create_response.lock().unwrap().clone() {
            return Ok(store);
        }
        let mut stores = self.stores.lock().unwrap();
        let next_id = stores
            .iter()
            .filter_map(|s| s.id.map(|id| id.as_i64()))
            .max()
            .unwrap_or(0)
            + 1;
        let created = Store {
            id: Some(StoreId::new(next_id)),
            name: payload.name.clone(),
            description: payload.description.clone(),
            slug: Some(payload.slug.to_string()),
            status: Some(StoreStatus::Draft),
            created_at: Some("2024-06-01T09:30:00Z".to_string()),
            ..Store::default()
        };
        stores.push(created.clone());
        Ok(created)
    }

    async fn update_store(&self, id: StoreId, patch: &StorePatch) -> Result<Store, ApiError> {
        self.enter("update_store")?;
        let mut stores = self.stores.lock().unwrap();
        let store = stores
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or(ApiError::NotFound)?;
        if let Some(status) = patch.status {
            store.status = Some(status);
        }
        if let Some(logo) = &patch.logo {
            store.logo = Some(logo.clone());
        }
        if let Some(favicon) = &patch.favicon {
            store.favicon = Some(favicon.clone());
        }
        Ok(store.clone())
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), ApiError> {
        self.enter("delete_store")?;
        self.stores.lock().unwrap().retain(|s| s.id != Some(id));
        Ok(())
    }

    async fn upload_store_logo(
        &self,
        id: StoreId,
        _file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        self.enter("upload_store_logo")?;
        Ok(Self::asset(id, "logo.png"))
    }

    async fn upload_store_favicon(
        &self,
        id: StoreId,
        _file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        self.enter("upload_store_favicon")?;
        Ok(Self::asset(id, "favicon.ico"))
    }
}

/// [`ApiProvider`] handing out one shared [`FakeApi`]; logins always fail.
#[derive(Default)]
pub struct FakeProvider {
    pub api: Arc<FakeApi>,
}

#[async_trait]
impl ApiProvider for FakeProvider {
    async fn login(
        &self,
        _email: &str,
        _password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        Err(ApiError::Unauthorized)
    }

    fn stores_for(&self, _token: &str) -> Arc<dyn StoreApi> {
        self.api.clone()
    }
}

/// Session fake with a settable state.
pub struct FakeSession {
    state: Mutex<SessionState>,
    logouts: Mutex<usize>,
}

impl FakeSession {
    pub fn new(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
            logouts: Mutex::new(0),
        }
    }

    pub fn logouts(&self) -> usize {
        *self.logouts.lock().unwrap()
    }
}

#[async_trait]
impl SessionCapability for FakeSession {
    fn state(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    async fn logout(&self) {
        *self.logouts.lock().unwrap() += 1;
        *self.state.lock().unwrap() = SessionState::Anonymous;
    }
}

/// Confirmation fake with a fixed answer; records every prompt.
pub struct FakeConfirm {
    answer: Mutex<bool>,
    prompts: Mutex<Vec<String>>,
}

impl FakeConfirm {
    pub fn answer(&self, answer: bool) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for FakeConfirm {
    fn default() -> Self {
        Self {
            answer: Mutex::new(true),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl Confirm for FakeConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        *self.answer.lock().unwrap()
    }
}

/// Every fake wired together.
pub struct Harness {
    pub api: Arc<FakeApi>,
    pub session: Arc<FakeSession>,
    pub notifier: Arc<ToastBuffer>,
    pub navigator: Arc<RecordingNavigator>,
    pub confirm: Arc<FakeConfirm>,
}

impl Harness {
    pub fn new(state: SessionState) -> Self {
        Self {
            api: Arc::new(FakeApi::default()),
            session: Arc::new(FakeSession::new(state)),
            notifier: Arc::new(ToastBuffer::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            confirm: Arc::new(FakeConfirm::default()),
        }
    }

    pub fn signed_in() -> Self {
        Self::new(SessionState::Authenticated(profile()))
    }

    pub fn ctx(&self) -> ViewContext {
        ViewContext {
            session: self.session.clone(),
            api: self.api.clone(),
            notifier: self.notifier.clone() as Arc<dyn Notifier>,
            navigator: self.navigator.clone(),
            confirm: self.confirm.clone(),
        }
    }
}
