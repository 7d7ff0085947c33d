use crate::error::{Error, Result};
use crate::prelude::{debug, warn};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::RootCertStore;
use std::path::Path;
use std::sync::Arc;

/// CA certificates that client certificates must chain to.
///
/// Immutable once built; clones share the same root store.
#[derive(Clone, Debug)]
pub struct TrustAnchor {
    roots: Arc<RootCertStore>,
}

impl TrustAnchor {
    /// Builds a trust anchor from a PEM bundle holding one or more CA certificates.
    ///
    /// ## Errors
    ///
    /// * [`Error::Pem`] if the PEM is malformed,
    /// * [`Error::NoCertificates`] if it holds no `CERTIFICATE` block,
    /// * [`Error::NoTrustAnchors`] if none of the certificates is usable as a root.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let certs = certs_from_pem(pem)?;

        let mut store = RootCertStore::empty();
        let (added, ignored) = store.add_parsable_certificates(certs);

        if ignored > 0 {
            warn!("ignored {ignored} CA certificate(s) that could not be used as trust anchors");
        }
        debug!("loaded {added} trust anchor(s)");

        if store.is_empty() {
            return Err(Error::NoTrustAnchors { ignored });
        }

        Ok(Self {
            roots: Arc::new(store),
        })
    }

    /// Number of CA certificates in the root store.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Always `false` for a successfully built trust anchor.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub(crate) fn roots(&self) -> Arc<RootCertStore> {
        Arc::clone(&self.roots)
    }
}

/// The certificate chain and private key the server presents during the handshake.
#[derive(Debug)]
pub struct ServerIdentity {
    cert_chain: Vec<CertificateDer<'static>>,
    private_key: PrivateKeyDer<'static>,
}

impl ServerIdentity {
    /// Builds an identity from DER material. The leaf certificate comes first.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::NoCertificates`] if `cert_chain` is empty.
    pub fn new(
        cert_chain: Vec<CertificateDer<'static>>,
        private_key: PrivateKeyDer<'static>,
    ) -> Result<Self> {
        if cert_chain.is_empty() {
            return Err(Error::NoCertificates);
        }

        Ok(Self {
            cert_chain,
            private_key,
        })
    }

    /// Builds an identity from a PEM certificate chain and a PEM private key.
    ///
    /// The key may be PKCS#8, PKCS#1 (RSA) or SEC1 (EC); the first key block wins.
    ///
    /// ## Errors
    ///
    /// * [`Error::Pem`] if either input is malformed,
    /// * [`Error::NoCertificates`] if `cert_pem` holds no certificate,
    /// * [`Error::NoPrivateKey`] if `key_pem` holds no private key.
    pub fn from_pem(cert_pem: &[u8], key_pem: &[u8]) -> Result<Self> {
        Self::new(certs_from_pem(cert_pem)?, private_key_from_pem(key_pem)?)
    }

    /// The certificate chain, leaf first.
    pub fn cert_chain(&self) -> &[CertificateDer<'static>] {
        &self.cert_chain
    }

    pub(crate) fn into_parts(self) -> (Vec<CertificateDer<'static>>, PrivateKeyDer<'static>) {
        (self.cert_chain, self.private_key)
    }
}

/// Reads a PEM CA bundle from `path`.
///
/// ## Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Material`]
/// wrapping the reason its contents were rejected.
pub fn load_trust_anchor(path: impl AsRef<Path>) -> Result<TrustAnchor> {
    let path = path.as_ref();
    let pem = read(path)?;
    within(path, TrustAnchor::from_pem(&pem))
}

/// Reads the server certificate chain from `cert_path` and its key from `key_path`.
///
/// Both files are read before either is parsed, so a missing file is always
/// reported as [`Error::Io`].
///
/// ## Errors
///
/// Returns [`Error::Io`] if a file cannot be read, or [`Error::Material`]
/// naming the file whose contents were rejected.
pub fn load_server_identity(
    cert_path: impl AsRef<Path>,
    key_path: impl AsRef<Path>,
) -> Result<ServerIdentity> {
    let (cert_path, key_path) = (cert_path.as_ref(), key_path.as_ref());

    let cert_pem = read(cert_path)?;
    let key_pem = read(key_path)?;

    let cert_chain = within(cert_path, certs_from_pem(&cert_pem))?;
    let private_key = within(key_path, private_key_from_pem(&key_pem))?;

    let identity = ServerIdentity::new(cert_chain, private_key)?;
    debug!(
        "loaded server identity from {} ({} certificate(s))",
        cert_path.display(),
        identity.cert_chain.len()
    );
    Ok(identity)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn within<T>(path: &Path, res: Result<T>) -> Result<T> {
    res.map_err(|e| Error::Material {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

fn certs_from_pem(pem: &[u8]) -> Result<Vec<CertificateDer<'static>>> {
    let certs = rustls_pemfile::certs(&mut &*pem)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::Pem)?;

    if certs.is_empty() {
        return Err(Error::NoCertificates);
    }

    Ok(certs)
}

fn private_key_from_pem(pem: &[u8]) -> Result<PrivateKeyDer<'static>> {
    rustls_pemfile::private_key(&mut &*pem)
        .map_err(Error::Pem)?
        .ok_or(Error::NoPrivateKey)
}
