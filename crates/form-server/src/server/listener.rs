//! Listening socket and the serial accept loop.
//!
//! Setup (socket create, bind, listen) happens once and any failure there is
//! fatal. After that, the loop accepts one client, completes the TLS
//! handshake, serves it until it goes away, and accepts the next. Accept and
//! handshake failures are logged and the loop carries on with no backoff.
//!
//! There is no read or write timeout: a client that stops sending stalls the
//! server until it disconnects.

use std::net::SocketAddr;
use std::sync::Arc;

use common::{ConnectionError, SetupError};
use rustls::ServerConfig;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio_rustls::TlsAcceptor;
use tracing::{debug, info, instrument, warn};

use super::connection;
use super::state::AppState;

/// Create a TCP socket, bind it to `addr`, and start listening.
///
/// # Errors
///
/// Each step maps to its own [`SetupError`] variant.
pub fn bind_listener(addr: SocketAddr, backlog: u32) -> Result<TcpListener, SetupError> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(SetupError::Socket)?;
    socket.set_reuseaddr(true).map_err(SetupError::Socket)?;
    debug!("socket created");

    socket
        .bind(addr)
        .map_err(|source| SetupError::Bind { addr, source })?;
    debug!(%addr, "socket bound");

    let listener = socket.listen(backlog).map_err(SetupError::Listen)?;
    info!(%addr, backlog, "listening");
    Ok(listener)
}

/// A bound TLS server ready to accept clients.
pub struct Server {
    listener: TcpListener,
    acceptor: TlsAcceptor,
    state: AppState,
}

impl Server {
    /// Bind the listener. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if the socket cannot be created, bound, or put
    /// into the listening state.
    pub fn bind(
        addr: SocketAddr,
        backlog: u32,
        tls: Arc<ServerConfig>,
        state: AppState,
    ) -> Result<Self, SetupError> {
        let listener = bind_listener(addr, backlog)?;
        Ok(Self {
            listener,
            acceptor: TlsAcceptor::from(tls),
            state,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and serve clients one at a time, forever.
    pub async fn run(self) {
        loop {
            if let Err(e) = self.accept_and_serve().await {
                warn!(kind = e.kind(), error = %e, "connection dropped");
            }
        }
    }

    /// One pass through accept → handshake → serve → close.
    async fn accept_and_serve(&self) -> Result<(), ConnectionError> {
        let (tcp, peer) = self.listener.accept().await.map_err(ConnectionError::Accept)?;
        info!(%peer, "client accepted");
        self.handshake_and_serve(tcp, peer).await
    }

    #[instrument(name = "connection", skip_all, fields(%peer))]
    async fn handshake_and_serve(&self, tcp: TcpStream, peer: SocketAddr) -> Result<(), ConnectionError> {
        let tls = self
            .acceptor
            .accept(tcp)
            .await
            .map_err(ConnectionError::Handshake)?;
        info!("TLS handshake completed");

        let summary = connection::serve(tls, &self.state).await;
        info!(
            requests = summary.requests,
            responses = summary.responses,
            end = summary.end.as_str(),
            "client closed"
        );
        Ok(())
    }
}
