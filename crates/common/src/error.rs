//! Error types shared across crates.
//!
//! Two tiers:
//! - [`SetupError`] — configuration-level failures before the accept loop
//!   starts. Fatal: the server stops.
//! - [`ConnectionError`] — failures scoped to one client. Logged, the
//!   connection is torn down, and the loop goes back to accepting.
//!
//! Form validation outcomes (empty field, wrong password) are not errors;
//! they are rendered into the response page.

use std::io;

use thiserror::Error;

/// Failure while bringing up the TLS context or the listening socket.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The certificate or key file could not be read.
    #[error("failed to read {what} from {path}: {source}")]
    ReadFile {
        what: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// The certificate chain could not be parsed or was empty.
    #[error("invalid certificate: {0}")]
    Certificate(String),

    /// The private key could not be parsed or was missing.
    #[error("invalid private key: {0}")]
    PrivateKey(String),

    /// rustls rejected the certificate/key pair.
    #[error("failed to build TLS context: {0}")]
    TlsContext(String),

    #[error("failed to create socket: {0}")]
    Socket(#[source] io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to listen: {0}")]
    Listen(#[source] io::Error),
}

/// Failure affecting a single client connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),

    #[error("TLS handshake failed: {0}")]
    Handshake(#[source] io::Error),

    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// The response could not be assembled.
    #[error("response composition failed: {0}")]
    Compose(#[from] FragmentError),
}

impl ConnectionError {
    /// Short label used as the `kind` field in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionError::Accept(_) => "accept",
            ConnectionError::Handshake(_) => "handshake",
            ConnectionError::Read(_) => "read",
            ConnectionError::Write(_) => "write",
            ConnectionError::Compose(_) => "compose",
        }
    }
}

/// Errors from fixed-capacity fragment lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FragmentError {
    #[error("fragment list is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
}
