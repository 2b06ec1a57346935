//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.1 to serve a handful of fixed routes, one request per
//! connection.
//!
//! # Architecture
//!
//! - **`connection`**: Drives a single request-response cycle
//! - **`request`**: Tokenizes the method and path out of the receive buffer
//! - **`response`**: Status codes and inline responses
//! - **`writer`**: Sends inline responses and the chunked preamble
//! - **`chunked`**: Chunked transfer-encoding frames
//! - **`stream`**: Reads a file in fixed blocks and frames it onto the stream
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read of up to 256 bytes
//!        └──────┬──────┘
//!               │ Bytes received (read error → abort, nothing sent)
//!               ▼
//!        ┌──────────────────┐
//!        │     Routing      │ ← Pick a page or a file
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Responding    │ ← Inline page, or chunked file body
//!        └──────┬───────────┘
//!               ▼
//!            Closed → stream handed back to the caller
//! ```
//!
//! # Example
//!
//! ```ignore
//! use chunkserve::config::Config;
//! use chunkserve::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let listener = TcpListener::bind(&config.listen_addr).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, &config);
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod chunked;
pub mod connection;
pub mod request;
pub mod response;
pub mod stream;
pub mod writer;

pub const HTTP_VERSION: &str = "HTTP/1.1";
