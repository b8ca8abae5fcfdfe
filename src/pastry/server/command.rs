//! Read port: one command in, one reply out.
//!
//! ```text
//! $ nc pastry.lan 9182 > latest.txt      # newest snippet
//! $ echo "grep TODO" | nc -N pastry.lan 9182
//! ```
//!
//! A client that sends nothing within the read timeout is treated as a plain
//! `get`. The reply is rendered from a single locked snapshot of the store on
//! the blocking pool and written once the lock is released.

use super::{accept_failed, read_payload, run_blocking, ConnOptions};
use crate::api::{is_client_error, PastryApi};
use crate::error::Result;
use crate::protocol::{execute, wire_reply, Request};
use crate::store::DataStore;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

/// The request a connection made and how the store answered it, before the
/// wire protocol hid any errors.
#[derive(Debug)]
pub struct Exchange {
    pub request: Request,
    pub outcome: Result<String>,
}

/// Serves one command connection. Only failures to write the reply surface
/// as `Err`; store errors are reported inside the returned [`Exchange`].
pub async fn handle<S, T>(mut stream: T, api: Arc<PastryApi<S>>, opts: ConnOptions) -> Result<Exchange>
where
    S: DataStore + 'static,
    T: AsyncRead + AsyncWrite + Unpin,
{
    let payload = read_payload(
        &mut stream,
        opts.max_payload_bytes,
        Some(opts.read_timeout),
        opts.read_timeout,
    )
    .await;

    let request = match payload {
        Ok(bytes) if !bytes.is_empty() => Request::parse(&String::from_utf8_lossy(&bytes)),
        Ok(_) => Request::implicit(),
        Err(e) => {
            tracing::debug!(error = %e, "read failed, falling back to get");
            Request::implicit()
        }
    };
    tracing::debug!(command = request.name(), mutation = request.is_mutation(), "dispatching");

    // Reads share the store lock with saves in progress, so every request
    // waits on the blocking pool rather than on a runtime worker.
    let req = request.clone();
    let outcome = run_blocking(&api, move |api| execute(api, &req)).await;

    let reply = wire_reply(&outcome);
    if !reply.is_empty() {
        stream.write_all(reply.as_bytes()).await?;
    }
    stream.shutdown().await?;

    Ok(Exchange { request, outcome })
}

pub async fn accept_loop<S: DataStore + 'static>(
    listener: TcpListener,
    api: Arc<PastryApi<S>>,
    opts: ConnOptions,
) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::debug!(%peer, "read connection accepted");
                let api = Arc::clone(&api);
                tokio::spawn(async move {
                    match handle(stream, api, opts).await {
                        Ok(Exchange {
                            outcome: Err(e),
                            request,
                        }) => {
                            if is_client_error(&e) {
                                tracing::debug!(%peer, command = request.name(), error = %e, "request ignored");
                            } else {
                                tracing::warn!(%peer, command = request.name(), error = %e, "request failed");
                            }
                        }
                        Ok(_) => {}
                        Err(e) => tracing::debug!(%peer, error = %e, "could not send reply"),
                    }
                });
            }
            Err(e) => accept_failed("read", e).await,
        }
    }
}
