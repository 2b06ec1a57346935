//! Chunked transfer-encoding frames.
//!
//! A frame is the payload length in lowercase hex, CRLF, the payload, CRLF.
//! The body ends with a zero-length frame.

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// The zero-length frame that terminates a chunked body.
pub const TERMINAL_CHUNK: &[u8] = b"0\r\n\r\n";

/// Encodes `payload` as a single frame.
///
/// ```
/// # use chunkserve::http::chunked::encode_chunk;
/// assert_eq!(&encode_chunk(b"hello")[..], b"5\r\nhello\r\n");
/// ```
pub fn encode_chunk(payload: &[u8]) -> Bytes {
    let header = format!("{:x}\r\n", payload.len());

    let mut buf = BytesMut::with_capacity(header.len() + payload.len() + 2);
    buf.put_slice(header.as_bytes());
    buf.put_slice(payload);
    buf.put_slice(b"\r\n");
    buf.freeze()
}

/// Writes frames to `inner`, one complete frame per write.
pub struct ChunkedWriter<'a, W> {
    inner: &'a mut W,
    frames: usize,
    bytes: u64,
}

impl<'a, W> ChunkedWriter<'a, W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(inner: &'a mut W) -> Self {
        Self {
            inner,
            frames: 0,
            bytes: 0,
        }
    }

    /// Sends `payload` as one frame. Empty payloads are skipped since a
    /// zero-length frame would end the body early.
    pub async fn write_chunk(&mut self, payload: &[u8]) -> std::io::Result<()> {
        if payload.is_empty() {
            return Ok(());
        }

        self.inner.write_all(&encode_chunk(payload)).await?;
        self.frames += 1;
        self.bytes += payload.len() as u64;
        Ok(())
    }

    /// Ends the body.
    ///
    /// In legacy mode the terminal marker is sent as a framed payload and then
    /// once more raw, reproducing the byte stream old clients were written
    /// against.
    pub async fn finish(self, legacy: bool) -> std::io::Result<()> {
        if legacy {
            self.inner.write_all(&encode_chunk(TERMINAL_CHUNK)).await?;
        }
        self.inner.write_all(TERMINAL_CHUNK).await?;
        self.inner.flush().await
    }

    /// Data frames sent so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Payload bytes sent so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}
