//! [`GestureServer`] – TCP ingestion loop for gesture events.
//!
//! Listens on `0.0.0.0:5555` (configurable via [`GestureServer::with_port`]).
//! One connection is serviced fully before the next accept is issued: the
//! actuator transport is a single-owner serial resource and must never see
//! interleaved writes from concurrent requests. Clients queue in the OS
//! listen backlog meanwhile.
//!
//! This is a fire-and-forget command channel. The server reads one bounded
//! payload per connection, never writes a response, and closes.

use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};
use wavebridge_types::BridgeError;

use crate::pipeline::BridgePipeline;

/// Default TCP port for gesture ingestion.
pub const DEFAULT_PORT: u16 = 5555;

/// At most this many bytes are read from a connection.
pub const READ_BUFFER_SIZE: usize = 1024;

// ---------------------------------------------------------------------------
// GestureServer
// ---------------------------------------------------------------------------

/// Sequential accept-read-process-close server driving a [`BridgePipeline`].
///
/// # Example
///
/// ```rust,no_run
/// use tokio::sync::watch;
/// use wavebridge_hal::sim::{SimCommandSink, SimObstacleSource};
/// use wavebridge_server::{BridgePipeline, GestureServer};
///
/// #[tokio::main]
/// async fn main() {
///     let pipeline = BridgePipeline::new(SimObstacleSource::clear(), SimCommandSink::new());
///     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
///     GestureServer::new(pipeline)
///         .run(shutdown_rx)
///         .await
///         .expect("gesture server failed");
/// }
/// ```
pub struct GestureServer {
    pipeline: BridgePipeline,
    port: u16,
}

impl GestureServer {
    /// Create a server around `pipeline` on the [`DEFAULT_PORT`].
    pub fn new(pipeline: BridgePipeline) -> Self {
        Self {
            pipeline,
            port: DEFAULT_PORT,
        }
    }

    /// Override the listening port (builder-style).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Return the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Bind the listening socket and serve until `shutdown` observes `true`
    /// or its sender is dropped.
    ///
    /// On shutdown the listening socket and the actuator transport are
    /// released and any attached display is reset to neutral.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Server`] if the TCP listener cannot bind.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<(), BridgeError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| BridgeError::Server(format!("bind {addr}: {e}")))?;
        info!(port = self.port, "listening for gesture events");
        self.serve(listener, shutdown).await
    }

    async fn serve(
        mut self,
        listener: TcpListener,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), BridgeError> {
        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => self.serve_connection(stream, peer).await,
                    Err(e) => warn!(error = %e, "accept failed"),
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("shutting down");
        self.pipeline.reset_display();
        Ok(())
    }

    /// Read at most one buffer from the client, feed it to the pipeline,
    /// and close. The connection never receives a response.
    async fn serve_connection(&mut self, mut stream: TcpStream, peer: SocketAddr) {
        debug!(%peer, "connection accepted");
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        match stream.read(&mut buffer).await {
            Ok(received) => self.ingest(&buffer[..received]).await,
            Err(e) => warn!(%peer, error = %e, "read failed"),
        }
    }

    /// Decode and trim the raw bytes; empty and undecodable payloads are
    /// dropped before the pipeline is invoked.
    async fn ingest(&mut self, raw: &[u8]) {
        let payload = match std::str::from_utf8(raw) {
            Ok(text) => text.trim(),
            Err(e) => {
                warn!(error = %e, "discarding undecodable payload");
                return;
            }
        };
        if payload.is_empty() {
            trace!("ignoring empty payload");
            return;
        }
        self.pipeline.process(payload).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
