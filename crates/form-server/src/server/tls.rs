//! TLS context setup using rustls.
//!
//! The certificate and private key are read from disk once at startup. Either
//! PEM or raw DER is accepted: input that starts with a `-----BEGIN` armour
//! line is parsed as PEM, anything else is taken as a single DER certificate
//! or a PKCS#8 DER private key.

use std::sync::Arc;

use common::SetupError;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::ServerConfig;
use tracing::info;

const PEM_ARMOUR: &[u8] = b"-----BEGIN";

/// Read the certificate chain and private key from disk and build the server
/// context.
///
/// # Errors
///
/// Returns a [`SetupError`] if either file cannot be read or the material is
/// rejected; see [`build_server_config`].
pub fn load_server_config(cert_path: &str, key_path: &str) -> Result<Arc<ServerConfig>, SetupError> {
    let cert = std::fs::read(cert_path).map_err(|source| SetupError::ReadFile {
        what: "certificate",
        path: cert_path.to_owned(),
        source,
    })?;
    let key = std::fs::read(key_path).map_err(|source| SetupError::ReadFile {
        what: "private key",
        path: key_path.to_owned(),
        source,
    })?;
    build_server_config(&cert, &key)
}

/// Build a [`rustls::ServerConfig`] from certificate and private key bytes.
///
/// # Errors
///
/// Returns an error if the certificate or key cannot be parsed, or if rustls
/// rejects the configuration.
pub fn build_server_config(cert: &[u8], key: &[u8]) -> Result<Arc<ServerConfig>, SetupError> {
    let certs = parse_certs(cert)?;
    info!(certificates = certs.len(), "certificate chain loaded");
    let key = parse_key(key)?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| SetupError::TlsContext(e.to_string()))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| SetupError::TlsContext(e.to_string()))?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    info!("TLS context created");
    Ok(Arc::new(config))
}

fn is_pem(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PEM_ARMOUR)
}

fn parse_certs(bytes: &[u8]) -> Result<Vec<CertificateDer<'static>>, SetupError> {
    if bytes.is_empty() {
        return Err(SetupError::Certificate("certificate data is empty".into()));
    }
    if !is_pem(bytes) {
        return Ok(vec![CertificateDer::from(bytes.to_vec())]);
    }

    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(bytes))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SetupError::Certificate(e.to_string()))?;
    if certs.is_empty() {
        return Err(SetupError::Certificate("no certificate found in PEM data".into()));
    }
    Ok(certs)
}

fn parse_key(bytes: &[u8]) -> Result<PrivateKeyDer<'static>, SetupError> {
    if bytes.is_empty() {
        return Err(SetupError::PrivateKey("private key data is empty".into()));
    }
    if !is_pem(bytes) {
        return Ok(PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(bytes.to_vec())));
    }

    rustls_pemfile::private_key(&mut std::io::BufReader::new(bytes))
        .map_err(|e| SetupError::PrivateKey(e.to_string()))?
        .ok_or_else(|| SetupError::PrivateKey("no private key found in PEM data".into()))
}
