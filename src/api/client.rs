//! HTTP client for the registrar REST API

use crate::config::{ConfigPaths, Credentials};
use crate::domain::DomainValidator;
use crate::error::{GandiError, Result};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

/// Versioned path prefix of every endpoint
pub const API_PREFIX: &str = "/v5";

/// Response body, JSON when it parses and raw text otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    Text(String),
}

/// Successful (2xx) response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status_code: u16,
    pub data: ResponseData,
    pub headers: HeaderMap,
}

impl ApiResponse {
    /// Deserialize the body into a typed shape
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.data {
            ResponseData::Json(value) => T::deserialize(value).map_err(|e| {
                GandiError::parse(
                    format!("Unexpected response shape: {}", e),
                    Some(value.to_string()),
                )
            }),
            ResponseData::Text(text) => Err(GandiError::parse(
                "Expected a JSON response body",
                Some(text.clone()),
            )),
        }
    }
}

/// Authenticated client bound to one API origin
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    credentials: Credentials,
    base_url: Url,
    pub(crate) validator: DomainValidator,
}

impl ApiClient {
    /// Create a client from already loaded credentials
    pub fn new(credentials: Credentials) -> Result<Self> {
        let base_url = Url::parse(credentials.api_url()).map_err(|e| {
            GandiError::config(format!("Invalid API URL '{}': {}", credentials.api_url(), e))
        })?;

        let client = Client::builder()
            .user_agent(concat!("gandi-domains/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GandiError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            base_url,
            validator: DomainValidator::new(),
        })
    }

    /// Load credentials from `paths` and create a client
    pub fn from_config(paths: &ConfigPaths) -> Result<Self> {
        Self::new(Credentials::load(paths)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL joined with `endpoint`, query pairs appended in order.
    ///
    /// Repeating a key yields a repeated query parameter.
    pub fn build_url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(endpoint).map_err(|e| {
            GandiError::validation(format!("Invalid endpoint '{}': {}", endpoint, e))
        })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Issue one request and normalize the response.
    ///
    /// Non-2xx responses and transport failures become `GandiError::Api`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<ApiResponse> {
        let url = self.build_url(endpoint, query)?;
        let start = Instant::now();

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .bearer_auth(self.credentials.token())
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            if method == Method::POST || method == Method::PUT || method == Method::PATCH {
                builder = builder.header(CONTENT_TYPE, "application/json");
            }
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        debug!(
            method = %method,
            endpoint = %endpoint,
            status = status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "API request completed"
        );

        if status.is_success() {
            return Ok(ApiResponse {
                status_code: status.as_u16(),
                data: parse_success_body(text),
                headers,
            });
        }

        let body = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| json!({ "message": text }));
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown status")
                )
            });

        Err(GandiError::api(message, Some(status.as_u16()), Some(body)))
    }

    /// GET `endpoint` with query pairs
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        self.request(Method::GET, endpoint, None, query).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish()
    }
}

fn parse_success_body(text: String) -> ResponseData {
    if text.trim().is_empty() {
        return ResponseData::Json(json!({}));
    }
    match serde_json::from_str(&text) {
        Ok(value) => ResponseData::Json(value),
        Err(_) => ResponseData::Text(text),
    }
}
