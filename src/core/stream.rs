//! Copies binary responses into a caller-supplied sink.

use futures::StreamExt;
use reqwest::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::error::Error;

/// Writes the body of a `200 OK` response into `sink` chunk by chunk and
/// returns the number of bytes written.
///
/// Any other status is an [`Error::UnexpectedStatus`]; the body is not
/// inspected since downloads are not JSON. The response is dropped on
/// every path, which releases the connection.
#[tracing::instrument(name = "stream_response", level = "debug", skip_all, err)]
pub async fn stream_response<W>(response: reqwest::Response, sink: &mut W) -> Result<u64, Error>
where
    W: AsyncWrite + Unpin + Send + ?Sized,
{
    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::UnexpectedStatus(status));
    }

    let mut body = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        sink.write_all(&chunk).await.map_err(Error::Sink)?;
        written += chunk.len() as u64;
    }

    sink.flush().await.map_err(Error::Sink)?;
    debug!(bytes = written, "download complete");
    Ok(written)
}
