use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ErrorBody, QueryParams};
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// API client for communicating with the ledger REST API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Raw body plus its declared content type
#[derive(Debug, Clone)]
pub struct RawBody {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_http_client(http, config.base_url.clone()))
    }

    /// Create a new API client around an existing reqwest client
    pub fn with_http_client(http: reqwest::Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Test connection to the backend
    pub async fn test_connection(&self) -> ClientResult<()> {
        let response = self
            .http
            .get(self.url("transactions"))
            .query(&[("limit", "1")])
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> ClientResult<T> {
        let request = self.http.get(self.url(path)).query(params.pairs());
        self.execute_json(Method::GET, path, request).await
    }

    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.http.request(method.clone(), self.url(path)).json(body);
        self.execute_json(method, path, request).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.http.delete(self.url(path));
        self.execute_json(Method::DELETE, path, request).await
    }

    /// GET returning the undecoded body (binary downloads)
    pub async fn get_raw(&self, path: &str, params: &QueryParams) -> ClientResult<RawBody> {
        debug!("GET {} (raw)", path);
        let response = self
            .http
            .get(self.url(path))
            .query(params.pairs())
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(RawBody {
            content_type,
            bytes,
        })
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        debug!("{} {}", method, path);
        let response = Self::check_status(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Turn non-2xx responses into `ClientError::Server`
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message())
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty() && !text.starts_with('{')).then(|| text.to_string())
            });
        warn!("❌ Server responded {}: {:?}", status, message);
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
