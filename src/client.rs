//! Core HTTP client for the DhanHQ REST API v2.
//!
//! The [`DhanClient`] struct is the upstream half of the broker proxy. It wraps
//! [`reqwest::Client`] with authentication headers and provides typed `get`,
//! `post`, `put`, and `delete` methods. Non-2xx responses become
//! [`DhanError::Api`] when the broker sent its structured error body, and
//! [`DhanError::HttpStatus`] otherwise; the broker's message is never dropped.

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::BrokerConfig;
use crate::error::{ApiErrorBody, DhanError, Result};

/// Core HTTP client for the DhanHQ REST API v2.
///
/// Auth header values are validated once at construction, so a token with
/// characters that cannot go into a header is a construction error rather
/// than a per-request one.
#[derive(Debug, Clone)]
pub struct DhanClient {
    http: reqwest::Client,
    client_id: String,
    base_url: String,
    auth_header_token: HeaderValue,
    auth_header_client_id: HeaderValue,
}

impl DhanClient {
    /// Build a client from a [`BrokerConfig`].
    pub fn new(config: &BrokerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .timeout(config.timeout)
            .build()?;

        let auth_header_token = HeaderValue::from_str(&config.access_token).map_err(|_| {
            DhanError::InvalidArgument("access token contains invalid header characters".into())
        })?;
        let auth_header_client_id = HeaderValue::from_str(&config.client_id).map_err(|_| {
            DhanError::InvalidArgument("client id contains invalid header characters".into())
        })?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            auth_header_token,
            auth_header_client_id,
        })
    }

    /// Returns the Dhan client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a GET request and deserialize the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .headers(self.auth_headers())
            .send()
            .await?;

        self.handle_response(resp).await
    }

    /// Perform a POST request with a JSON body and deserialize the response.
    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let resp = self
            .http
            .post(&url)
            .headers(self.auth_headers())
            .json(body)
            .send()
            .await?;

        self.handle_response(resp).await
    }

    /// Perform a PUT request with a JSON body and deserialize the response.
    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");

        let resp = self
            .http
            .put(&url)
            .headers(self.auth_headers())
            .json(body)
            .send()
            .await?;

        self.handle_response(resp).await
    }

    /// Perform a DELETE request and deserialize the JSON response.
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");

        let resp = self
            .http
            .delete(&url)
            .headers(self.auth_headers())
            .send()
            .await?;

        self.handle_response(resp).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("access-token", self.auth_header_token.clone());
        headers.insert("client-id", self.auth_header_client_id.clone());
        headers
    }

    async fn handle_response<R: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(DhanError::Json)
        } else {
            let body = String::from_utf8_lossy(&bytes);
            tracing::warn!(%status, "broker returned an error response");
            Err(parse_error_body(status, &body))
        }
    }
}

/// Try to parse the API's JSON error structure; fall back to a raw HTTP
/// status error.
pub fn parse_error_body(status: reqwest::StatusCode, body: &str) -> DhanError {
    if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(body) {
        if api_err.error_code.is_some() || api_err.error_message.is_some() {
            return DhanError::Api {
                status,
                body: api_err,
            };
        }
    }
    DhanError::HttpStatus {
        status,
        body: body.to_owned(),
    }
}
