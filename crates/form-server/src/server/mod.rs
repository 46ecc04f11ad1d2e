//! TLS listener, accept loop, and per-request response composition.
//!
//! # Responsibilities
//! - Build the rustls server context from the configured certificate and key.
//! - Create, bind, and listen on the TCP socket.
//! - Accept one client at a time, serve its requests, then close it.
//! - Compose the start page or the form-result page for each request.

pub mod connection;
pub mod listener;
pub mod response;
pub mod state;
pub mod tls;

pub use listener::Server;
pub use state::{AppState, Credentials};

#[cfg(test)]
pub(crate) mod span_log;
