//! Serving one established client stream.
//!
//! Each iteration reads once into a fixed receive buffer, decides the reply,
//! and writes it. The loop ends when the peer closes, a read fails, or the
//! start page has been sent. The stream is then shut down and dropped.

use common::ConnectionError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument, warn};

use super::response::{self, Reply};
use super::state::AppState;

/// Capacity of the receive buffer. A longer request is truncated to its
/// first read.
pub const RECV_BUF_LEN: usize = 1024;

/// Why the per-connection loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The read returned end-of-stream.
    PeerClosed,
    /// The read returned an error.
    ReadFailed,
    /// A `GET` was answered; the connection is closed after the start page.
    StartPageSent,
}

impl SessionEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEnd::PeerClosed => "peer_closed",
            SessionEnd::ReadFailed => "read_failed",
            SessionEnd::StartPageSent => "start_page_sent",
        }
    }
}

/// Counters for one served connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Reads that returned data.
    pub requests: usize,
    /// Replies written in full.
    pub responses: usize,
    pub end: SessionEnd,
}

/// Serve requests on `stream` until the client goes away, then shut it down.
///
/// Read and write failures are logged, never returned: they only affect this
/// client.
pub async fn serve<S>(mut stream: S, state: &AppState) -> SessionSummary
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut recv_buf = [0u8; RECV_BUF_LEN];
    let mut requests = 0;
    let mut responses = 0;

    let end = loop {
        recv_buf.fill(0);
        let n = match stream.read(&mut recv_buf).await {
            Ok(0) => break SessionEnd::PeerClosed,
            Ok(n) => n,
            Err(e) => {
                let e = ConnectionError::Read(e);
                warn!(kind = e.kind(), error = %e, "closing connection");
                break SessionEnd::ReadFailed;
            }
        };
        requests += 1;

        let handled = handle_request(&mut stream, &recv_buf[..n], state).await;
        if handled.replied {
            responses += 1;
        }
        if handled.ends_connection {
            break SessionEnd::StartPageSent;
        }
    };

    if let Err(e) = stream.shutdown().await {
        debug!(error = %e, "shutdown did not complete cleanly");
    }

    SessionSummary {
        requests,
        responses,
        end,
    }
}

/// What happened to one received buffer.
struct Handled {
    replied: bool,
    ends_connection: bool,
}

#[instrument(name = "request", skip_all, fields(bytes = raw.len()))]
async fn handle_request<S>(stream: &mut S, raw: &[u8], state: &AppState) -> Handled
where
    S: AsyncWrite + Unpin,
{
    let mut handled = Handled {
        replied: false,
        ends_connection: false,
    };
    debug!("request received");

    let reply = match response::respond(raw, &state.credentials) {
        Ok(reply) => reply,
        Err(e) => {
            let e = ConnectionError::from(e);
            warn!(kind = e.kind(), error = %e, "request dropped");
            return handled;
        }
    };
    let Some(bytes) = reply.as_bytes() else {
        debug!("no reply for request");
        return handled;
    };

    match write_reply(stream, bytes).await {
        Ok(()) => {
            handled.replied = true;
            debug!(bytes = bytes.len(), "reply written");
        }
        Err(e) => warn!(kind = e.kind(), error = %e, "reply abandoned"),
    }
    handled.ends_connection = reply.ends_connection();
    handled
}

async fn write_reply<S>(stream: &mut S, bytes: &[u8]) -> Result<(), ConnectionError>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(bytes).await.map_err(ConnectionError::Write)?;
    stream.flush().await.map_err(ConnectionError::Write)
}
