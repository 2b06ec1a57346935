use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::config::Config;
use crate::http::request::REQUEST_BUFFER_SIZE;
use crate::http::stream::stream_file;
use crate::http::writer::write_static;
use crate::router::{Action, route};

/// One request/response cycle over an accepted stream.
///
/// The connection never closes the stream itself; take it back with
/// [`Connection::into_inner`] once [`Connection::run`] returns.
pub struct Connection<'a, S> {
    stream: S,
    config: &'a Config,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Routing { buffer: [u8; REQUEST_BUFFER_SIZE], len: usize },
    Responding(Action),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: &'a Config) -> Self {
        Self {
            stream,
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request.
    ///
    /// Only a failed receive is returned as an error, in which case nothing
    /// has been written. Send and file failures are logged here and the cycle
    /// still ends normally.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &self.state {
                ConnectionState::Reading => {
                    let mut buffer = [0u8; REQUEST_BUFFER_SIZE];
                    let len = self
                        .stream
                        .read(&mut buffer)
                        .await
                        .context("failed to receive request")?;
                    self.state = ConnectionState::Routing { buffer, len };
                }

                ConnectionState::Routing { buffer, len } => {
                    let action = route(&buffer[..*len], self.config.legacy_wire);
                    tracing::debug!(?action, "request routed");
                    self.state = ConnectionState::Responding(action);
                }

                ConnectionState::Responding(action) => {
                    let action = *action;
                    self.respond(action).await;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    async fn respond(&mut self, action: Action) {
        let legacy = self.config.legacy_wire;

        match action {
            Action::Static(page) => {
                write_static(&mut self.stream, &page.response(legacy)).await;
            }
            Action::Stream {
                content_type,
                relative_path,
            } => {
                let path = self.config.root.join(relative_path);
                stream_file(&mut self.stream, content_type, &path, legacy).await;
            }
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}
