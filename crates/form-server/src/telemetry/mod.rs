//! Structured logging, with optional OTLP span export.
//!
//! Logs are JSON on stdout. When `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans
//! are also exported over OTLP/gRPC.
//!
//! # Telemetry invariants
//!
//! - The form password and submitted field values never appear in any span
//!   attribute or log field. Request bodies are logged by length only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridden
//!   by `RUST_LOG` when present.

pub mod init;

pub use init::init_telemetry;
