//! Read-only state handed to every connection.

use std::sync::Arc;

/// The shared secret a form submission must match.
///
/// The value is never printed; its `Debug` output is redacted.
#[derive(Clone)]
pub struct Credentials {
    password: Arc<[u8]>,
}

impl Credentials {
    pub fn new(password: impl AsRef<[u8]>) -> Self {
        Self {
            password: Arc::from(password.as_ref()),
        }
    }

    /// `true` only if `candidate` has exactly the secret's length and bytes.
    ///
    /// A strict prefix of the secret, or the secret followed by extra bytes,
    /// is rejected. The byte comparison does not stop at the first mismatch.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        if candidate.len() != self.password.len() {
            return false;
        }
        self.password
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials([REDACTED])")
    }
}

/// State shared by every connection the server handles.
///
/// Nothing in here is mutated after startup, so no state carries over from
/// one client to the next.
#[derive(Clone, Debug)]
pub struct AppState {
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}
