use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::http::chunked::ChunkedWriter;
use crate::http::writer::write_stream_preamble;

/// Bytes read from disk per frame.
pub const BLOCK_SIZE: usize = 1024;

/// Streams the file at `path` as a chunked `200` response.
///
/// If the file cannot be opened nothing is sent at all. A failed preamble is
/// logged and the body is still attempted. A failure while sending the body
/// stops the stream and leaves the response truncated. The file is closed
/// before returning on every path.
pub async fn stream_file<W>(stream: &mut W, content_type: &str, path: &Path, legacy: bool)
where
    W: AsyncWrite + Unpin,
{
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to open file");
            return;
        }
    };

    if let Err(e) = write_stream_preamble(stream, content_type).await {
        tracing::warn!(content_type, error = %e, "failed to send response header");
    }

    if let Err(e) = send_body(stream, &mut file, path, legacy).await {
        tracing::warn!(path = %path.display(), error = %e, "chunked body truncated");
    }
}

async fn send_body<W, R>(stream: &mut W, file: &mut R, path: &Path, legacy: bool) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    let mut writer = ChunkedWriter::new(stream);
    let mut block = [0u8; BLOCK_SIZE];

    loop {
        let n = read_block(file, &mut block).await?;
        if n == 0 {
            break;
        }
        writer.write_chunk(&block[..n]).await?;
    }

    let (frames, bytes) = (writer.frames(), writer.bytes());
    writer.finish(legacy).await?;

    tracing::debug!(path = %path.display(), frames, bytes, "file streamed");
    Ok(())
}

/// Fills `block` from `reader`, stopping early only at end of input.
/// Returns the number of bytes read; `0` means end of input.
async fn read_block<R>(reader: &mut R, block: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < block.len() {
        match reader.read(&mut block[filled..]).await? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
