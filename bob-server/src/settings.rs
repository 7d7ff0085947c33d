//! Listen address and key material locations.

use std::path::{Path, PathBuf};

/// Host the server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port the server binds to.
pub const DEFAULT_PORT: u16 = 3000;

/// CA bundle client certificates must chain to.
pub const CA_FILE: &str = "ca.crt";
/// Server certificate chain.
pub const SERVER_CERT_FILE: &str = "bob_server.crt";
/// Server private key.
pub const SERVER_KEY_FILE: &str = "bob_server.key";

/// Everything the server needs before it can bind.
///
/// The default points at `ca.crt`, `bob_server.crt` and `bob_server.key` in the
/// working directory and listens on `127.0.0.1:3000`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Host to bind.
    pub host: String,
    /// Port to bind; `0` picks a free one.
    pub port: u16,
    /// Trust anchor (PEM CA bundle).
    pub ca_path: PathBuf,
    /// Server certificate chain (PEM).
    pub cert_path: PathBuf,
    /// Server private key (PEM).
    pub key_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self::in_dir("")
    }
}

impl Settings {
    /// Default settings with the three key material files looked up in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            ca_path: dir.join(CA_FILE),
            cert_path: dir.join(SERVER_CERT_FILE),
            key_path: dir.join(SERVER_KEY_FILE),
        }
    }

    /// Overrides the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
