//! # Network Layer
//!
//! Pastry listens on three ports at once:
//!
//! ```text
//!   9181  write    ── ingest::handle ──┐
//!   9182  command  ── command::handle ─┼──▶ Arc<PastryApi>  ──▶ DataStore
//!   9180  http     ── web::router ─────┘
//! ```
//!
//! Every accepted TCP connection gets its own tokio task and is served exactly
//! once. Handlers are written against `AsyncRead + AsyncWrite` rather than
//! `TcpStream`, so tests drive them through in-memory duplex pipes.
//!
//! Nothing in here is fatal except binding: a port that cannot be bound aborts
//! startup, while a failing accept or a misbehaving client is logged and the
//! loop carries on.

use crate::api::PastryApi;
use crate::config::PastryConfig;
use crate::error::{PastryError, Result};
use crate::store::DataStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpListener;
use tokio::time::timeout;

pub mod command;
pub mod ingest;
pub mod templates;
pub mod web;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Per-connection limits shared by the two TCP protocols.
#[derive(Debug, Clone, Copy)]
pub struct ConnOptions {
    pub max_payload_bytes: usize,
    pub read_timeout: Duration,
}

impl From<&PastryConfig> for ConnOptions {
    fn from(config: &PastryConfig) -> Self {
        Self {
            max_payload_bytes: config.max_payload_bytes,
            read_timeout: config.read_timeout(),
        }
    }
}

impl Default for ConnOptions {
    fn default() -> Self {
        Self::from(&PastryConfig::default())
    }
}

/// Reads one payload of at most `cap` bytes.
///
/// The first read waits up to `first_byte` (forever when `None`); a timeout
/// there yields an empty payload. Once data has arrived, reading continues
/// until EOF, `cap`, or `idle` without new bytes, so payloads split across TCP
/// segments come back whole. An I/O error after some data has arrived ends the
/// payload instead of discarding it.
pub async fn read_payload<R: AsyncRead + Unpin>(
    reader: &mut R,
    cap: usize,
    first_byte: Option<Duration>,
    idle: Duration,
) -> std::io::Result<Vec<u8>> {
    let mut buf = vec![0u8; cap];
    let mut filled = 0;

    while filled < cap {
        let deadline = if filled == 0 { first_byte } else { Some(idle) };
        let read = reader.read(&mut buf[filled..]);
        let result = match deadline {
            Some(limit) => match timeout(limit, read).await {
                Ok(result) => result,
                Err(_) => break,
            },
            None => read.await,
        };

        match result {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if filled == 0 => return Err(e),
            Err(e) => {
                tracing::debug!(error = %e, filled, "read failed mid-payload, keeping what arrived");
                break;
            }
        }
    }

    buf.truncate(filled);
    Ok(buf)
}

/// Runs a store call on the blocking pool; store mutations write to disk.
pub async fn run_blocking<S, T, F>(api: &Arc<PastryApi<S>>, f: F) -> Result<T>
where
    S: DataStore + 'static,
    T: Send + 'static,
    F: FnOnce(&PastryApi<S>) -> Result<T> + Send + 'static,
{
    let api = Arc::clone(api);
    tokio::task::spawn_blocking(move || f(&api))
        .await
        .map_err(|e| PastryError::Server(format!("store task failed: {}", e)))?
}

/// The three bound listeners. Binding is split from serving so callers (and
/// tests) can bind ephemeral ports and learn the addresses first.
pub struct Listeners {
    pub ingest: TcpListener,
    pub command: TcpListener,
    pub http: TcpListener,
}

async fn bind_one(addr: SocketAddr, what: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| PastryError::Server(format!("failed to listen on {} port {}: {}", what, addr, e)))
}

impl Listeners {
    pub async fn bind(config: &PastryConfig) -> Result<Self> {
        Ok(Self {
            ingest: bind_one(config.write_addr(), "write").await?,
            command: bind_one(config.read_addr(), "read").await?,
            http: bind_one(config.http_addr(), "http").await?,
        })
    }

    /// Binds all three listeners to ephemeral ports on `127.0.0.1`.
    pub async fn ephemeral() -> Result<Self> {
        let any: SocketAddr = SocketAddr::from(([127, 0, 0, 1], 0));
        Ok(Self {
            ingest: bind_one(any, "write").await?,
            command: bind_one(any, "read").await?,
            http: bind_one(any, "http").await?,
        })
    }

    pub fn ingest_addr(&self) -> Result<SocketAddr> {
        Ok(self.ingest.local_addr()?)
    }

    pub fn command_addr(&self) -> Result<SocketAddr> {
        Ok(self.command.local_addr()?)
    }

    pub fn http_addr(&self) -> Result<SocketAddr> {
        Ok(self.http.local_addr()?)
    }
}

/// Serves all three surfaces until one fails or the process receives Ctrl-C.
pub async fn serve<S: DataStore + 'static>(
    listeners: Listeners,
    api: Arc<PastryApi<S>>,
    opts: ConnOptions,
) -> Result<()> {
    let Listeners {
        ingest,
        command,
        http,
    } = listeners;

    log_listening("write", &ingest);
    log_listening("read", &command);
    log_listening("http", &http);

    let app = web::router(Arc::clone(&api));
    let http_server = async move { axum::serve(http, app).await };

    tokio::select! {
        result = http_server => {
            result.map_err(|e| PastryError::Server(format!("http server stopped: {}", e)))
        }
        () = ingest::accept_loop(ingest, Arc::clone(&api), opts) => Ok(()),
        () = command::accept_loop(command, Arc::clone(&api), opts) => Ok(()),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    }
}

fn log_listening(what: &str, listener: &TcpListener) {
    match listener.local_addr() {
        Ok(addr) => tracing::info!(%addr, "{} port listening", what),
        Err(e) => tracing::warn!(error = %e, "{} port listening on unknown address", what),
    }
}

/// Logs a failed accept and pauses briefly so a persistent failure (such as
/// running out of file descriptors) does not spin.
pub(crate) async fn accept_failed(what: &str, err: std::io::Error) {
    tracing::error!(error = %err, "accept failed on {} port", what);
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}
