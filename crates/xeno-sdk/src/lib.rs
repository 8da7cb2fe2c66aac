//! Xeno CRM Rust SDK
//!
//! Async client for the Xeno CRM backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use xeno_sdk::{Client, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new("http://localhost:8000")?;
//!
//!     let segments = client.audience().list().await?;
//!     for segment in segments {
//!         println!("{} ({} customers)", segment.name, segment.customers.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! [`Client`] also implements the `xeno-crm` gateway ports, so it can be
//! handed straight to the page view-models.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Method};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

pub use error::{Error, Result};

pub mod error;
pub mod gateway;
pub mod services;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// HTTP Client
// =============================================================================

/// Configuration for the Xeno client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Xeno backend client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid backend URL: {}", config.base_url)));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        let user_agent = header::HeaderValue::from_str(&format!("xeno-sdk/{}", VERSION))
            .map_err(|e| Error::Config(e.to_string()))?;
        headers.insert(header::USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner { base_url, http }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Audience segment endpoints
    pub fn audience(&self) -> services::AudienceService {
        services::AudienceService::new(self.clone())
    }

    /// Campaign endpoints
    pub fn campaigns(&self) -> services::CampaignsService {
        services::CampaignsService::new(self.clone())
    }

    /// Order endpoints
    pub fn orders(&self) -> services::OrdersService {
        services::OrdersService::new(self.clone())
    }

    /// Customer message log
    pub fn messages(&self) -> services::MessagesService {
        services::MessagesService::new(self.clone())
    }

    /// Customer registration
    pub fn customers(&self) -> services::CustomersService {
        services::CustomersService::new(self.clone())
    }

    /// Make a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// Make a POST request
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    fn url(&self, path: &str) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }

    /// One attempt, no retries; failures go back to the caller as-is
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.inner.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body_bytes = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), bytes = body_bytes.len(), "Received response");

        if status.is_success() {
            if body_bytes.is_empty() {
                return Ok(serde_json::from_str("null")?);
            }
            return Ok(serde_json::from_slice(&body_bytes)?);
        }

        Err(Error::Api {
            status_code: status.as_u16(),
            message: error::extract_message(&body_bytes),
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .finish()
    }
}
