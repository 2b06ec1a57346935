use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!(root = %cfg.root.display(), legacy_wire = cfg.legacy_wire, "Listening on {}", cfg.listen_addr);

    serve(listener, cfg).await
}

/// Accepts connections one at a time, serving each to completion before the
/// next accept. Returns only if accepting fails.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener
            .accept()
            .await
            .context("failed to accept connection")?;
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, cfg);
        if let Err(e) = conn.run().await {
            tracing::error!("Connection error from {}: {:#}", peer, e);
        }

        let mut socket = conn.into_inner();
        if let Err(e) = socket.shutdown().await {
            tracing::debug!(%peer, error = %e, "shutdown failed");
        }
    }
}
