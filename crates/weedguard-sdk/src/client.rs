//! HTTP client for the Weed Guard API
//!
//! This module provides a type-safe client for the Weed Guard
//! prediction backend. Requests are dispatched with the stored bearer
//! token attached; when the backend rejects the token, authorization
//! is restored through a single coordinated refresh and the request is
//! replayed exactly once with the rotated token.
//!
//! # Usage
//!
//! ```rust,no_run
//! use weedguard_sdk::ClientBuilder;
//!
//! # async fn example() -> weedguard_sdk::Result<()> {
//! let client = ClientBuilder::new()
//!     .base_url("http://localhost:8000/api/")
//!     .build()?;
//!
//! client.login("farmer@example.com", "secret").await?;
//! let analytics = client.analytics_summary().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::auth::refresh::RefreshCoordinator;
use crate::auth::{TokenPair, TokenStore};
use crate::error::{ApiError, Result};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::types::{
    AnalyticsSummary, LoginRequest, PredictOutcome, Prediction, PredictionUpload,
    PredictionsListResponse, RegisterRequest, RegisterResponse,
};

/// Default timeout in seconds for API requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for interacting with the Weed Guard API
pub struct WeedGuardClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
    refresh: RefreshCoordinator,
}

impl WeedGuardClient {
    /// Create a new client (private - use ClientBuilder instead)
    fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into());
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        let refresh =
            RefreshCoordinator::new(http_client.clone(), format!("{base_url}refresh-token/"));

        Ok(Self {
            http_client,
            base_url,
            tokens: TokenStore::new(storage),
            refresh,
        })
    }

    /// Token store backing this client.
    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Whether a credential pair is currently stored.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.get().await.is_some()
    }

    // ===== Accounts =====

    /// Register a new account.
    ///
    /// When the backend issues tokens with the registration response,
    /// they are persisted and the session is immediately usable.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        let response: RegisterResponse = self.post("user/", request).await?;
        if let (Some(access), Some(refresh)) = (&response.access_token, &response.refresh_token) {
            self.tokens.set(&TokenPair::new(access, refresh)).await?;
        }
        Ok(response)
    }

    /// Log in and persist the issued credential pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let pair: TokenPair = self.post("login/", &request).await?;
        self.tokens.set(&pair).await?;
        Ok(pair)
    }

    /// Drop the local session.
    ///
    /// Idempotent; the backend keeps no server-side session state to
    /// invalidate.
    pub async fn logout(&self) -> Result<()> {
        self.tokens.clear().await?;
        Ok(())
    }

    // ===== Predictions =====

    /// Upload a crop image for weed prediction.
    pub async fn upload_prediction(&self, upload: &PredictionUpload) -> Result<PredictOutcome> {
        let url = format!("{}predict/", self.base_url);
        debug!(%url, "uploading prediction image");
        let response = self
            .send_with_auth(|| {
                // Multipart bodies are single-use; rebuild per attempt.
                let part = Part::bytes(upload.image.clone())
                    .file_name(upload.file_name.clone())
                    .mime_str(&upload.mime_type)
                    .map_err(|e| ApiError::Config {
                        message: format!("invalid MIME type {:?}: {e}", upload.mime_type),
                    })?;
                let form = Form::new()
                    .part("image", part)
                    .text("site_name", upload.site_name.clone())
                    .text("location", upload.location.clone())
                    .text("farmer_id", upload.farmer_id.clone());
                Ok(self.http_client.post(&url).multipart(form))
            })
            .await?;
        Self::decode(response).await
    }

    /// List stored predictions.
    pub async fn list_predictions(&self) -> Result<Vec<Prediction>> {
        let response: PredictionsListResponse = self.get("predictions-list/").await?;
        Ok(response.predictions)
    }

    /// Fetch a single prediction by id.
    pub async fn get_prediction(&self, id: &str) -> Result<Prediction> {
        self.get(&format!("predictions/{id}/")).await
    }

    // ===== Analytics =====

    /// Fetch the aggregated analytics summary.
    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary> {
        self.get("analytics/").await
    }

    // ===== Private helper methods =====

    /// Generic GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "dispatching GET");
        let response = self
            .send_with_auth(|| Ok(self.http_client.get(&url)))
            .await?;
        Self::decode(response).await
    }

    /// Generic POST request with a JSON body
    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "dispatching POST");
        let response = self
            .send_with_auth(|| Ok(self.http_client.post(&url).json(body)))
            .await?;
        Self::decode(response).await
    }

    /// Attach the stored bearer token, if any.
    ///
    /// Requests to public endpoints proceed unauthenticated when
    /// nothing is stored.
    async fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get().await {
            Some(pair) => request.bearer_auth(pair.access_token),
            None => request,
        }
    }

    /// Dispatch a request with bearer attachment and 401 recovery.
    ///
    /// On a 401 with a stored credential pair, authorization is
    /// restored through the refresh coordinator and the request is
    /// replayed exactly once with the rotated token; a 401 on the
    /// replay means the session is gone. A 401 with no stored pair
    /// (e.g. a rejected login) passes through untouched.
    async fn send_with_auth(&self, make: impl Fn() -> Result<RequestBuilder>) -> Result<Response> {
        let request = self.apply_auth(make()?).await;
        let response = request.send().await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        if self.tokens.get().await.is_none() {
            return Ok(response);
        }

        debug!("access token rejected, restoring authorization");
        let token = self.refresh.fresh_access_token(&self.tokens).await?;
        let retry = make()?.bearer_auth(token);
        let response = retry.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthExpired);
        }
        Ok(response)
    }

    /// Decode a 2xx JSON body, or surface the error status verbatim.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Http { status, body })
        }
    }
}

fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Builder for constructing a WeedGuardClient with custom configuration
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    storage: Option<Arc<dyn KeyValueStorage>>,
}

impl ClientBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the API
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Back the token store with the given storage
    pub fn storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Keep tokens in memory only (tests, throwaway sessions)
    pub fn with_memory_storage(mut self) -> Self {
        self.storage = Some(Arc::new(MemoryStorage::new()));
        self
    }

    /// Build the client.
    ///
    /// Defaults: compiled-in base URL (overridable via
    /// `WEEDGUARD_API_URL`), 10 second timeout, file-backed token
    /// storage under the platform data directory.
    pub fn build(self) -> Result<WeedGuardClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(weedguard_common::api_base_url);
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let storage: Arc<dyn KeyValueStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileStorage::in_data_dir()?),
        };

        WeedGuardClient::new(base_url, timeout, storage)
    }
}
