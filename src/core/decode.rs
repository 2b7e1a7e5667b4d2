use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::{Error, ErrorEnvelope};

/// Splits a finished response into its body bytes or an error.
///
/// Any status >= 400 is decoded as an error envelope. A body that is not a
/// valid envelope surfaces as [`Error::Decode`]; a valid one as
/// [`Error::Api`]. Below 400 the body is returned untouched.
pub async fn decode_response(response: reqwest::Response) -> Result<Bytes, Error> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.as_u16() >= 400 {
        let envelope: ErrorEnvelope = serde_json::from_slice(&body).map_err(Error::Decode)?;
        warn!(status = %status, error_type = %envelope.error.r#type, "API returned error");
        return Err(Error::Api {
            status,
            error: envelope.error,
        });
    }

    Ok(body)
}

/// Unmarshals success bytes into the caller's shape.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(Error::Decode)
}
