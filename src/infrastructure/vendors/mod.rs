//! Vendor adapters - one HTTP request per capability
//!
//! Every operation builds a [`VendorRequest`], sends it through the shared
//! client and parses the answer into a typed value. Failures never leave this
//! module as transport errors, only as [`VendorError`].

pub mod chat;
pub mod image;
pub mod news;
pub mod price;

use reqwest::{Client, Method, Response};
use std::sync::Arc;

use crate::application::errors::{BotError, Capability, VendorError};
use crate::infrastructure::config::Config;

pub use news::Headline;
pub use price::PriceQuote;

/// Result type for vendor operations
pub type VendorResult<T> = Result<T, VendorError>;

/// How a request authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    None,
    Bearer(String),
    Header { name: &'static str, value: String },
}

/// A single outbound vendor call, built right before it is sent
#[derive(Debug, Clone)]
pub struct VendorRequest {
    pub capability: Capability,
    pub method: Method,
    pub endpoint: String,
    pub auth: Auth,
    pub accept: Option<&'static str>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}

impl VendorRequest {
    pub fn get(capability: Capability, endpoint: impl Into<String>) -> Self {
        Self::new(capability, Method::GET, endpoint)
    }

    pub fn post(capability: Capability, endpoint: impl Into<String>) -> Self {
        Self::new(capability, Method::POST, endpoint)
    }

    fn new(capability: Capability, method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            capability,
            method,
            endpoint: endpoint.into(),
            auth: Auth::None,
            accept: None,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Query value by key, mostly for tests and logs
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }
}

/// HTTP client shared by all vendor operations
#[derive(Clone)]
pub struct VendorClient {
    http: Client,
    config: Arc<Config>,
}

impl VendorClient {
    pub fn new(config: Arc<Config>) -> Result<Self, BotError> {
        let http = Client::builder()
            .user_agent(concat!("buddy-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| BotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a request; anything but a 2xx status is reported as unavailable
    pub async fn execute(&self, request: VendorRequest) -> VendorResult<Response> {
        let capability = request.capability;
        let mut builder = self.http.request(request.method, &request.endpoint);

        builder = match request.auth {
            Auth::None => builder,
            Auth::Bearer(token) => builder.bearer_auth(token),
            Auth::Header { name, value } => builder.header(name, value),
        };
        if let Some(accept) = request.accept {
            builder = builder.header(reqwest::header::ACCEPT, accept);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(operation = %capability, endpoint = %request.endpoint, "Calling vendor");

        let response = builder
            .send()
            .await
            .map_err(|e| VendorError::unavailable(capability, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            tracing::warn!(operation = %capability, status = status.as_u16(), body = %snippet, "Vendor returned an error status");
            return Err(VendorError::unavailable(capability, format!("status {}", status)));
        }

        Ok(response)
    }

    /// Send a request and decode the JSON body
    pub async fn execute_json<T: serde::de::DeserializeOwned>(&self, request: VendorRequest) -> VendorResult<T> {
        let capability = request.capability;
        self.execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| VendorError::unavailable(capability, format!("malformed response: {}", e)))
    }
}
