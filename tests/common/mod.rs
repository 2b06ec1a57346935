//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use chunkserve::config::Config;
use chunkserve::http::connection::Connection;
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};

pub const TEXT: &[u8] = b"Hello, chunked world!\nSecond line.\n";
pub const JSON: &[u8] = br#"{"name":"chunkserve","ok":true}"#;

/// Deterministic non-text bytes.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Exactly one block.
pub fn image_bytes() -> Vec<u8> {
    pattern(1024)
}

/// Several full blocks plus a partial one.
pub fn book_bytes() -> Vec<u8> {
    pattern(3 * 1024 + 100)
}

/// A scratch install laid out the way the route table expects: the base
/// path is `bin/`, resources live in its sibling directories.
pub fn fixture_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("bin")).unwrap();
    write(dir.path(), "text/readme.txt", TEXT);
    write(dir.path(), "img/grassland_preview.png", &image_bytes());
    write(dir.path(), "book/Demidovich-Sb_Zad_po_Matanu.pdf", &book_bytes());
    write(dir.path(), "json/data.json", JSON);
    dir
}

/// Base path to serve a [`fixture_root`] from.
pub fn serve_root(dir: &TempDir) -> PathBuf {
    dir.path().join("bin")
}

/// Base path with an existing directory but no resources next to it.
pub fn empty_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("bin")).unwrap();
    dir
}

pub fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Sends `request` through a [`Connection`] and returns everything written
/// back before the stream was closed.
pub async fn exchange(cfg: &Config, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(8 * 1024);
    client.write_all(request).await.unwrap();

    let serve = async {
        let mut conn = Connection::new(server, cfg);
        conn.run().await.unwrap();
        drop(conn.into_inner());
    };
    let receive = async {
        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        out
    };

    let ((), out) = tokio::join!(serve, receive);
    out
}

/// Splits a response into its header block (without the blank line) and body.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8(raw[..end].to_vec()).unwrap();
    (head, raw[end + 4..].to_vec())
}

/// A decoded chunked body.
#[derive(Debug)]
pub struct Dechunked {
    /// Payloads in frame order, terminal (empty) frame included.
    pub frames: Vec<Vec<u8>>,
    /// Bytes after the terminal frame.
    pub trailing: Vec<u8>,
}

impl Dechunked {
    pub fn payload(&self) -> Vec<u8> {
        self.frames.concat()
    }
}

/// Decodes `body` up to and including its zero-length frame.
///
/// Fails if a declared length does not line up with the CRLF that must
/// follow the payload, so a successful decode proves every frame's length
/// header is exact.
pub fn dechunk(body: &[u8]) -> Result<Dechunked, String> {
    let mut frames = Vec::new();
    let mut rest = body;

    loop {
        let line_end = rest
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or("missing size line")?;
        let size_text = std::str::from_utf8(&rest[..line_end]).map_err(|e| e.to_string())?;
        if size_text.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(format!("size {size_text:?} is not lowercase"));
        }
        let size = usize::from_str_radix(size_text, 16).map_err(|e| e.to_string())?;
        rest = &rest[line_end + 2..];

        if rest.len() < size + 2 {
            return Err(format!("frame of {size} bytes is truncated"));
        }
        if &rest[size..size + 2] != b"\r\n" {
            return Err(format!("frame of {size} bytes is not followed by CRLF"));
        }

        frames.push(rest[..size].to_vec());
        rest = &rest[size + 2..];

        if size == 0 {
            return Ok(Dechunked {
                frames,
                trailing: rest.to_vec(),
            });
        }
    }
}

/// Stream whose reads always fail. Anything written to it is kept.
#[derive(Default)]
pub struct BrokenRead {
    pub written: Vec<u8>,
}

impl AsyncRead for BrokenRead {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        )))
    }
}

impl AsyncWrite for BrokenRead {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.get_mut().written.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Writer that accepts up to `limit` bytes and fails after that. With
/// `fail_first` set, only the first write fails.
pub struct FlakyWriter {
    pub written: Vec<u8>,
    limit: usize,
    fail_first: bool,
    writes: usize,
}

impl FlakyWriter {
    pub fn failing_after(limit: usize) -> Self {
        Self {
            written: Vec::new(),
            limit,
            fail_first: false,
            writes: 0,
        }
    }

    pub fn failing_first_write() -> Self {
        Self {
            fail_first: true,
            ..Self::failing_after(usize::MAX)
        }
    }

    pub fn always_failing() -> Self {
        Self::failing_after(0)
    }
}

impl AsyncWrite for FlakyWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        this.writes += 1;

        if this.fail_first && this.writes == 1 {
            return Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()));
        }

        let room = this.limit - this.written.len();
        if room == 0 {
            return Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()));
        }

        let n = room.min(buf.len());
        this.written.extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
