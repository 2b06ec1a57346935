use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::HTTP_VERSION;
use crate::http::response::{Response, StatusCode};

/// Sends a complete inline response. A failed send is logged and swallowed;
/// the connection is closed by the caller either way.
pub async fn write_static<W>(stream: &mut W, response: &Response)
where
    W: AsyncWrite + Unpin,
{
    let bytes = response.to_bytes();

    if let Err(e) = send(stream, &bytes).await {
        tracing::warn!(
            status = response.status.code(),
            error = %e,
            "failed to send response"
        );
    }
}

/// Header block that precedes a chunked body.
pub fn stream_preamble(content_type: &str) -> Vec<u8> {
    format!(
        "{} {} {}\r\nTransfer-Encoding: chunked\r\nContent-Type: {}\r\n\r\n",
        HTTP_VERSION,
        StatusCode::Ok.as_u16(),
        StatusCode::Ok.reason_phrase(),
        content_type
    )
    .into_bytes()
}

pub async fn write_stream_preamble<W>(stream: &mut W, content_type: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    send(stream, &stream_preamble(content_type)).await
}

async fn send<W>(stream: &mut W, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    stream.write_all(bytes).await?;
    stream.flush().await
}
