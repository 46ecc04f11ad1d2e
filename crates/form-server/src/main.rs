//! `form-server` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP export).
//! 3. Build the TLS context from the configured certificate and private key.
//! 4. Create, bind, and listen on the server socket.
//! 5. Accept and serve clients one at a time, forever.
//!
//! Any failure in steps 1–4 is fatal and the process exits non-zero.

mod config;
mod server;
mod telemetry;

use anyhow::Result;
use tracing::{error, info};

use config::Config;
use server::{AppState, Credentials, Server};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        tls_port = cfg.tls_port,
        "form-server starting"
    );

    // -----------------------------------------------------------------------
    // 3. TLS context
    // -----------------------------------------------------------------------
    let tls = server::tls::load_server_config(&cfg.tls_cert_path, &cfg.tls_key_path)
        .inspect_err(|e| error!(error = %e, "TLS setup failed"))?;

    // -----------------------------------------------------------------------
    // 4. Listener
    // -----------------------------------------------------------------------
    let state = AppState::new(Credentials::new(&cfg.form_password));
    let server = Server::bind(cfg.listen_addr()?, cfg.listen_backlog, tls, state)
        .inspect_err(|e| error!(error = %e, "listener setup failed"))?;
    info!(addr = %server.local_addr()?, "accepting clients");

    // -----------------------------------------------------------------------
    // 5. Serve
    // -----------------------------------------------------------------------
    server.run().await;
    Ok(())
}
