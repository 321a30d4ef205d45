use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiResponse;
use crate::config::{build_auth_header, ApiConfig, SecureString};

/// Paths of the account API, relative to the configured base URL.
pub mod endpoints {
    pub const SIGN_IN: &str = "/user/sign-in";
    pub const SIGN_UP: &str = "/user/sign-up";
    pub const SIGN_OUT: &str = "/user/sign-out";
    pub const UPDATE_USER: &str = "/user/update";
    pub const CHANGE_PASSWORD: &str = "/user/change-password";
}

/// Shared request client.
///
/// Clones share the same connection pool and the same credential slot, so a
/// token installed during bootstrap is seen by every caller.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credential: Arc<RwLock<Option<SecureString>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            credential: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install the default credential sent with every request.
    pub fn set_credential(&self, token: &str) {
        *self.credential.write() = Some(SecureString::new(token));
        tracing::debug!("API credential installed");
    }

    pub fn clear_credential(&self) {
        if self.credential.write().take().is_some() {
            tracing::debug!("API credential cleared");
        }
    }

    pub fn credential(&self) -> Option<SecureString> {
        self.credential.read().clone()
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<R>, ApiError> {
        let url = self.url(path);
        self.send(url.clone(), self.request(Method::GET, &url)).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<ApiResponse<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        self.send(url.clone(), self.request(Method::POST, &url).json(body))
            .await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<ApiResponse<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        self.send(url.clone(), self.request(Method::PUT, &url).json(body))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some((name, value)) = self.credential().as_ref().and_then(build_auth_header) {
            builder = builder.header(name, value);
        }
        builder
    }

    async fn send<R: DeserializeOwned>(
        &self,
        url: String,
        builder: RequestBuilder,
    ) -> Result<ApiResponse<R>, ApiError> {
        let response = builder.send().await.map_err(|source| ApiError::Connection {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Connection { url, source })?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "API request rejected");
            return Err(ApiError::rejected(status, &body));
        }

        // Empty success bodies (e.g. 204) decode as JSON null.
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };
        let data = serde_json::from_slice(body).map_err(|source| ApiError::Decode {
            status: status.as_u16(),
            source,
        })?;

        Ok(ApiResponse {
            status: status.as_u16(),
            data,
        })
    }
}
