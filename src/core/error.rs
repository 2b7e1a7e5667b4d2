use std::fmt;
use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors returned by every call made through the client.
#[derive(Error, Debug)]
pub enum Error {
    /// Network, DNS or connection failure reported by the HTTP stack.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timeout")]
    Timeout,

    /// The API answered with a status >= 400 and a well-formed error envelope.
    #[error("{error}")]
    Api { status: StatusCode, error: ApiError },

    /// A response body (success or error) was not the JSON we expected.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request parameters could not be serialized.
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Request parameters could not be flattened into form fields.
    #[error("Form error: {0}")]
    Form(String),

    /// A file referenced by a multipart parameter could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A download answered with anything other than `200 OK`.
    #[error("bad status: {0}")]
    UnexpectedStatus(StatusCode),

    /// Writing a downloaded body into the caller's sink failed.
    #[error("Sink error: {0}")]
    Sink(#[source] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }

    /// The remote error envelope, if the API reported one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status attached to API and download failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::UnexpectedStatus(status) => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else {
            Error::Transport(e)
        }
    }
}

/// The `error` object the API returns on failure.
///
/// `param` has no fixed shape on the wire, so it is kept as raw JSON and only
/// turned into text when the error is displayed.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "string_or_null")]
    pub message: String,

    #[serde(rename = "type", default, deserialize_with = "string_or_null")]
    pub r#type: String,

    #[serde(default, deserialize_with = "string_or_null")]
    pub code: String,

    #[serde(default)]
    pub param: Value,
}

impl ApiError {
    /// Renders `param` the way the error message shows it: strings as-is,
    /// everything else as compact JSON.
    pub fn param_text(&self) -> String {
        match &self.param {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message: {} | Type: {} | Code: {} | Param: {}",
            self.message,
            self.r#type,
            self.code,
            self.param_text()
        )
    }
}

/// Wire shape of a failure body: `{"error": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub error: ApiError,
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
