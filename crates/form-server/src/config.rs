//! Configuration loading and validation for the form server.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated form-server configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Shared secret a submission must carry in its `password` field. **Required.**
    pub form_password: String,

    /// Path to the TLS certificate chain (PEM, or a single DER certificate).
    /// **Required.**
    pub tls_cert_path: String,

    /// Path to the TLS private key (PEM, or PKCS#8 DER). **Required.**
    pub tls_key_path: String,

    /// IP address the listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port the HTTPS listener binds to.
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,

    /// Pending-connection queue length passed to `listen`.
    #[serde(default = "default_listen_backlog")]
    pub listen_backlog: u32,

    /// Tracing log level (e.g. `"info"`, `"debug"`), used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP endpoint for span export. Export is disabled when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0".into()
}
fn default_tls_port() -> u16 {
    443
}
fn default_listen_backlog() -> u32 {
    32
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Socket address the listener binds to.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not an IP address: {}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.tls_port))
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.form_password.is_empty() {
            anyhow::bail!("FORM_PASSWORD is required and must not be empty");
        }
        ensure_non_empty(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty(&self.tls_key_path, "TLS_KEY_PATH")?;
        self.listen_addr()?;

        if self.listen_backlog == 0 {
            anyhow::bail!("LISTEN_BACKLOG must be > 0");
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            ensure_non_empty(endpoint, "OTEL_EXPORTER_OTLP_ENDPOINT")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("form_password", &"[REDACTED]")
            .field("tls_cert_path", &self.tls_cert_path)
            .field("tls_key_path", &self.tls_key_path)
            .field("bind_addr", &self.bind_addr)
            .field("tls_port", &self.tls_port)
            .field("listen_backlog", &self.listen_backlog)
            .field("log_level", &self.log_level)
            .field("otel_exporter_otlp_endpoint", &self.otel_exporter_otlp_endpoint)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
