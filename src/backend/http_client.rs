//! HTTP client for the storefront backend
//!
//! Thin wrapper over `reqwest` that resolves endpoints against the
//! configured base URL, applies transport timeouts and turns non-2xx
//! responses and malformed bodies into `ApiError`s. Requests are sent once;
//! callers decide how to degrade on failure.

use reqwest::{multipart::Form, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::ApiSettings;
use super::traits::{ApiError, ApiResult};

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client from API settings
    pub fn new(settings: &ApiSettings) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(concat!("print-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpClient {
            client,
            base_url: settings.resolve_base_url()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint name (e.g. "products.php") against the base URL
    pub fn endpoint(&self, name: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(name)?)
    }

    /// GET an endpoint and decode its JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let url = self.endpoint(endpoint)?;
        self.execute(self.client.get(url)).await
    }

    /// POST a multipart form and decode the JSON response
    pub async fn post_multipart<T: DeserializeOwned>(&self, endpoint: &str, form: Form) -> ApiResult<T> {
        let url = self.endpoint(endpoint)?;
        self.execute(self.client.post(url).multipart(form)).await
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Backend responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            let snippet: String = text.chars().take(500).collect();
            ApiError::Parse(format!("JSON parse error: {} - Body: {}", e, snippet))
        })
    }
}
