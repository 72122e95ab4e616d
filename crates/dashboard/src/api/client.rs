//! HTTP client for the StoreMaker REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use storemaker_core::{NewStore, Store, StoreId, StorePatch, UploadedAsset};
use tracing::instrument;
use url::Url;

use super::{ApiError, ApiProvider, LoginResponse, StoreApi, StoreFile};

/// StoreMaker REST API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// Build the URL for a path below the API root.
    ///
    /// `["stores", "7", "logo"]` under `http://api/v1/` is
    /// `http://api/v1/stores/7/logo`.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }
}

#[async_trait]
impl ApiProvider for ApiClient {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        let response = self
            .http()
            .post(self.endpoint(&["auth", "login"]))
            .json(&serde_json::json!({
                "email": email,
                "password": password.expose_secret(),
            }))
            .send()
            .await?;

        read_json(response).await
    }

    fn stores_for(&self, token: &str) -> Arc<dyn StoreApi> {
        Arc::new(HttpStoreApi {
            client: self.clone(),
            token: SecretString::from(token.to_string()),
        })
    }
}

/// [`StoreApi`] over HTTP, authorized with one user's bearer token.
pub struct HttpStoreApi {
    client: ApiClient,
    token: SecretString,
}

impl HttpStoreApi {
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.token.expose_secret())
    }

    fn store_url(&self, id: StoreId, rest: &[&str]) -> Url {
        let id = id.to_string();
        let mut segments = vec!["stores", id.as_str()];
        segments.extend_from_slice(rest);
        self.client.endpoint(&segments)
    }

    async fn upload(&self, url: Url, file: StoreFile) -> Result<UploadedAsset, ApiError> {
        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .authorized(self.client.http().post(url))
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    #[instrument(skip(self))]
    async fn list_stores(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .authorized(self.client.http().get(self.client.endpoint(&["stores"])))
            .send()
            .await?;

        read_json(response).await
    }

    #[instrument(skip(self), fields(store_id = %id))]
    async fn get_store(&self, id: StoreId) -> Result<Store, ApiError> {
        let response = self
            .authorized(self.client.http().get(self.store_url(id, &[])))
            .send()
            .await?;

        read_json(response).await
    }

    #[instrument(skip(self, payload), fields(slug = %payload.slug))]
    async fn create_store(&self, payload: &NewStore) -> Result<Store, ApiError> {
        let response = self
            .authorized(self.client.http().post(self.client.endpoint(&["stores"])))
            .json(payload)
            .send()
            .await?;

        read_json(response).await
    }

    #[instrument(skip(self, patch), fields(store_id = %id))]
    async fn update_store(&self, id: StoreId, patch: &StorePatch) -> Result<Store, ApiError> {
        let response = self
            .authorized(self.client.http().put(self.store_url(id, &[])))
            .json(patch)
            .send()
            .await?;

        read_json(response).await
    }

    #[instrument(skip(self), fields(store_id = %id))]
    async fn delete_store(&self, id: StoreId) -> Result<(), ApiError> {
        let response = self
            .authorized(self.client.http().delete(self.store_url(id, &[])))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self, file), fields(store_id = %id, file = %file.file_name))]
    async fn upload_store_logo(
        &self,
        id: StoreId,
        file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        self.upload(self.store_url(id, &["logo"]), file).await
    }

    #[instrument(skip(self, file), fields(store_id = %id, file = %file.file_name))]
    async fn upload_store_favicon(
        &self,
        id: StoreId,
        file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        self.upload(self.store_url(id, &["favicon"]), file).await
    }
}

// =============================================================================
// Response handling
// =============================================================================

/// Map a non-success status and its body to an `ApiError`.
fn status_error(status: StatusCode, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => ApiError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "StoreMaker API request failed");
    Err(status_error(status, body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = check_status(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
