//! HTTP transport used by every resource and mutation.
//!
//! [`ApiClient`] is the production implementation on top of `reqwest`. It holds
//! nothing but static configuration, so a single instance is shared by all
//! hook instances through [`SharedTransport`].

use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::{config::ClientConfig, errors::ApiError};

/// Future returned by a [`Transport`]: the raw response body on 2xx
pub type TransportFuture = BoxFuture<'static, Result<String, ApiError>>;

/// The shared, type-erased transport handle
pub type SharedTransport = Arc<dyn Transport>;

/// Issues requests against the backend API
///
/// Paths are relative to the configured base URL (e.g. `/projects`). A returned
/// future may be dropped at any point; dropping it aborts the request.
pub trait Transport: Send + Sync + 'static {
    /// Issue a GET request and resolve to the response body
    fn get(&self, path: &str) -> TransportFuture;

    /// Issue a POST request with a JSON body and resolve to the response body
    fn post(&self, path: &str, body: serde_json::Value) -> TransportFuture;
}

/// A `reqwest` based client for the portfolio backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    dev_logging: bool,
    inner_client: reqwest::Client,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// ## Errors
    ///
    /// Returns `ApiError::Configuration` if no backend URL was supplied or the
    /// underlying client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let inner_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|err| ApiError::Configuration(err.to_string()))?;

        Ok(Self {
            base_url: config.base_url(),
            dev_logging: config.dev_logging(),
            inner_client,
        })
    }

    /// Wrap this client into the shared handle used by hooks
    pub fn into_shared(self) -> SharedTransport {
        Arc::new(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn log_outgoing(&self, method: &str, url: &str) {
        if self.dev_logging {
            crate::log_request!("{} {}", method, url);
        }
    }
}

impl Transport for ApiClient {
    fn get(&self, path: &str) -> TransportFuture {
        let url = self.format_url(path);
        self.log_outgoing("GET", &url);
        let request = self.inner_client.get(url);

        async move {
            let response = request.send().await?;
            ok_text(response).await
        }
        .boxed()
    }

    fn post(&self, path: &str, body: serde_json::Value) -> TransportFuture {
        let url = self.format_url(path);
        self.log_outgoing("POST", &url);
        let request = self.inner_client.post(url).json(&body);

        async move {
            let response = request.send().await?;
            ok_text(response).await
        }
        .boxed()
    }
}

/// Read the body of a successful response, or turn a non-2xx answer into
/// `ApiError::Status` carrying the response text.
async fn ok_text(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
