//! chunkserve - minimal chunked file server
//!
//! Serves a fixed set of routes, one request per connection, streaming files
//! from disk with chunked transfer encoding.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
