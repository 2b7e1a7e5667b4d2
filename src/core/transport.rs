//! Outbound request construction and dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tracing::debug;

use super::config::ClientConfig;
use super::error::Error;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const HEADER_ORGANIZATION: &str = "OpenAI-Organization";

/// One outbound call. Built fresh per request and consumed by the transport.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: Method,
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            content_type: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.content_type = Some(content_type.into());
        self
    }
}

/// Sends a request and hands back the raw response.
///
/// Implementations own authentication. Tests swap in a fake to control
/// responses without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<reqwest::Response, Error>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    pub fn new(config: Arc<ClientConfig>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build reqwest client: {e}")))?;

        Ok(Self { client, config })
    }

    fn build(&self, request: RequestDescriptor) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key.expose()));

        if let Some(content_type) = request.content_type.filter(|ct| !ct.is_empty()) {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        if let Some(org) = self
            .config
            .organization_id
            .as_deref()
            .filter(|org| !org.is_empty())
        {
            builder = builder.header(HEADER_ORGANIZATION, org);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        builder
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(
        name = "http_request",
        level = "debug",
        skip(self, request),
        fields(method = %request.method, url = %request.url),
        err
    )]
    async fn send(&self, request: RequestDescriptor) -> Result<reqwest::Response, Error> {
        let response = self.build(request).send().await?;
        debug!(status = %response.status(), "HTTP response received");
        Ok(response)
    }
}
