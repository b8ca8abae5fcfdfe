//! Write port: whatever a client sends becomes one snippet.
//!
//! ```text
//! $ echo "hello" | nc -N pastry.lan 9181
//! ```

use super::{accept_failed, read_payload, run_blocking, ConnOptions};
use crate::api::PastryApi;
use crate::error::{PastryError, Result};
use crate::store::DataStore;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one ingest connection.
///
/// Returns the index of the stored snippet, `None` if the client sent
/// nothing, or `InvalidEncoding` if the payload was not UTF-8. None of these
/// are reported to the client; the connection is simply closed.
pub async fn handle<S, T>(mut stream: T, api: Arc<PastryApi<S>>, opts: ConnOptions) -> Result<Option<usize>>
where
    S: DataStore + 'static,
    T: AsyncRead + AsyncWrite + Unpin,
{
    let outcome = match read_payload(&mut stream, opts.max_payload_bytes, None, opts.read_timeout).await {
        Ok(payload) if payload.is_empty() => Ok(None),
        Ok(payload) => run_blocking(&api, move |api| api.append(&payload)).await.map(Some),
        Err(e) => Err(e.into()),
    };

    // Closing only after the append lets a client that waits for EOF know
    // its snippet is stored.
    let _ = stream.shutdown().await;
    outcome
}

pub async fn accept_loop<S: DataStore + 'static>(
    listener: TcpListener,
    api: Arc<PastryApi<S>>,
    opts: ConnOptions,
) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::debug!(%peer, "write connection accepted");
                let api = Arc::clone(&api);
                tokio::spawn(async move {
                    match handle(stream, api, opts).await {
                        Ok(Some(_)) => {}
                        Ok(None) => tracing::debug!(%peer, "empty paste ignored"),
                        Err(PastryError::InvalidEncoding) => {
                            tracing::debug!(%peer, "paste is not valid UTF-8, discarded")
                        }
                        Err(e) => tracing::warn!(%peer, error = %e, "paste failed"),
                    }
                });
            }
            Err(e) => accept_failed("write", e).await,
        }
    }
}
