//! Client configuration.

use std::fmt;
use std::time::Duration;

use super::error::Error;

pub const API_BASE: &str = "https://api.openai.com/v1";
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const ORGANIZATION_ENV_VAR: &str = "OPENAI_ORGANIZATION";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Secret API key. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Everything a [`Client`](crate::Client) needs to talk to the API.
///
/// Frozen once the client is built and shared by every resource API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub organization_id: Option<String>,
    pub request_timeout: Duration,
    pub base_url: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
            organization_id: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            base_url: API_BASE.to_string(),
            user_agent: format!("openai-bindings/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Reads the key from `OPENAI_API_KEY` and, if set, the organization from
    /// `OPENAI_ORGANIZATION`.
    pub fn from_env() -> Result<Self, Error> {
        let key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config(format!("{API_KEY_ENV_VAR} not set")))?;

        let mut config = Self::new(key);
        if let Ok(org) = std::env::var(ORGANIZATION_ENV_VAR) {
            config = config.with_organization(org);
        }
        Ok(config)
    }

    /// An empty id is treated as "no organization".
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        let organization_id = organization_id.into();
        self.organization_id = (!organization_id.is_empty()).then_some(organization_id);
        self
    }

    /// A zero duration falls back to the default timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = if timeout.is_zero() {
            DEFAULT_REQUEST_TIMEOUT
        } else {
            timeout
        };
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
