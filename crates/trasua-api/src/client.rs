//! # API Client
//!
//! HTTP client setup and response handling shared by every resource.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resource call (e.g. products().get("p1"))                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiClient::request(GET, "/sanpham/p1")                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send ──── transport error ──────────────────► ClientError::Request     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  status?                                                                │
//! │   ├── 404 ───────────────────────────────────► ClientError::NotFound    │
//! │   ├── other non-2xx ── body.message ─────────► ClientError::Api         │
//! │   └── 2xx                                                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  { "success": true, "data": ..., "message": ... }                       │
//! │        │                                                                │
//! │        ├── bad JSON / no data ───────────────► ClientError::Decode      │
//! │        └── data ─────────────────────────────► T                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::resource::order::OrderResource;
use crate::resource::product::ProductResource;

// =============================================================================
// Configuration
// =============================================================================

/// Client configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use trasua_api::ApiConfig;
///
/// let config = ApiConfig::new("http://localhost:5000/api/")
///     .timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url, "http://localhost:5000/api");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, without trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Every shop service response wraps its payload like this.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Error bodies may or may not be JSON.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// Shop service client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds the client.
    ///
    /// ## Errors
    /// `ClientError::Config` if the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        debug!(base_url = %config.base_url, timeout = ?config.timeout, "API client ready");

        Ok(ApiClient {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the product resource.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let products = client.products().search("matcha").await?;
    /// ```
    pub fn products(&self) -> ProductResource {
        ProductResource::new(self.clone())
    }

    /// Returns the order resource.
    pub fn orders(&self) -> OrderResource {
        OrderResource::new(self.clone())
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path = %path, "Shop service request");
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends the request and returns the envelope's `data`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> ClientResult<T> {
        let body = self.send(builder, path).await?;

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            warn!(path = %path, error = %e, "Undecodable response body");
            ClientError::Decode(e.to_string())
        })?;

        envelope.data.ok_or_else(|| {
            let detail = envelope.message.unwrap_or_default();
            warn!(path = %path, message = %detail, "Response has no data");
            ClientError::Decode(format!("response has no data {}", detail).trim_end().to_string())
        })
    }

    /// Sends the request and ignores the payload.
    pub(crate) async fn execute(&self, builder: RequestBuilder, path: &str) -> ClientResult<()> {
        self.send(builder, path).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> ClientResult<String> {
        let response = builder.send().await.map_err(|e| {
            warn!(path = %path, error = %e, "Shop service unreachable");
            ClientError::Request(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        warn!(path = %path, status = status.as_u16(), "Shop service returned an error");

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                path: path.to_string(),
            }),
            status => Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body, status),
            }),
        }
    }
}

fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
