//! StoreMaker REST API access.
//!
//! Views talk to the backend through the [`StoreApi`] trait so they can be
//! driven against the real HTTP client or an in-memory fake. A
//! [`StoreApi`] is always bound to one signed-in user's bearer token; the
//! [`ApiProvider`] hands them out and performs the login exchange.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use storemaker_core::{NewStore, Store, StoreId, StorePatch, UploadedAsset, UserProfile};
use thiserror::Error;

pub use client::{ApiClient, HttpStoreApi};

/// Errors that can occur when talking to the StoreMaker API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The bearer token was missing, expired or rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("Not found")]
    NotFound,

    /// Any other non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// A file picked by the user for upload.
#[derive(Clone)]
pub struct StoreFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for StoreFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Successful login exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Store operations for one authenticated user.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetch the store collection as raw JSON; the envelope shape varies.
    async fn list_stores(&self) -> Result<serde_json::Value, ApiError>;

    async fn get_store(&self, id: StoreId) -> Result<Store, ApiError>;

    async fn create_store(&self, payload: &NewStore) -> Result<Store, ApiError>;

    async fn update_store(&self, id: StoreId, patch: &StorePatch) -> Result<Store, ApiError>;

    async fn delete_store(&self, id: StoreId) -> Result<(), ApiError>;

    async fn upload_store_logo(
        &self,
        id: StoreId,
        file: StoreFile,
    ) -> Result<UploadedAsset, ApiError>;

    async fn upload_store_favicon(
        &self,
        id: StoreId,
        file: StoreFile,
    ) -> Result<UploadedAsset, ApiError>;
}

/// Entry point to the backend: login plus per-user store access.
#[async_trait]
pub trait ApiProvider: Send + Sync {
    /// Exchange credentials for a bearer token and the user's profile.
    async fn login(&self, email: &str, password: &SecretString)
    -> Result<LoginResponse, ApiError>;

    /// Store operations authorized with `token`.
    fn stores_for(&self, token: &str) -> Arc<dyn StoreApi>;
}

/// [`StoreApi`] for a visitor without a session; every call is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedOut;

#[async_trait]
impl StoreApi for SignedOut {
    async fn list_stores(&self) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn get_store(&self, _id: StoreId) -> Result<Store, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn create_store(&self, _payload: &NewStore) -> Result<Store, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn update_store(&self, _id: StoreId, _patch: &StorePatch) -> Result<Store, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn delete_store(&self, _id: StoreId) -> Result<(), ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn upload_store_logo(
        &self,
        _id: StoreId,
        _file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn upload_store_favicon(
        &self,
        _id: StoreId,
        _file: StoreFile,
    ) -> Result<UploadedAsset, ApiError> {
        Err(ApiError::Unauthorized)
    }
}
