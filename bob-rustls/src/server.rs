use crate::error::{Error, Result};
use crate::material::{ServerIdentity, TrustAnchor};
use crate::prelude::debug;
use crate::verifier::TrustAnchorClientVerifier;
use rustls::ServerConfig;
use std::sync::Arc;

/// Builds a [`rustls::ServerConfig`] for mutual TLS.
///
/// The resulting server configuration:
///
/// * presents the [`ServerIdentity`] as the server certificate
/// * requires a client certificate on every handshake
/// * validates it against the [`TrustAnchor`] (chain, signatures, validity period)
#[derive(Debug)]
pub struct ServerConfigBuilder {
    trust_anchor: TrustAnchor,
    identity: ServerIdentity,
    alpn_protocols: Vec<Vec<u8>>,
}

impl ServerConfigBuilder {
    /// Creates a new builder from the trust anchor and server identity.
    pub fn new(trust_anchor: TrustAnchor, identity: ServerIdentity) -> Self {
        Self {
            trust_anchor,
            identity,
            alpn_protocols: Vec::new(),
        }
    }

    /// Sets the ALPN protocols advertised to clients, in preference order.
    ///
    /// Clients that do not use ALPN are still accepted.
    #[must_use]
    pub fn with_alpn_protocols<I, P>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.alpn_protocols = protocols
            .into_iter()
            .map(|p| p.as_ref().to_vec())
            .collect();
        self
    }

    /// Builds the `rustls::ServerConfig`.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    ///
    /// * the client certificate verifier cannot be built from the trust anchor,
    /// * or the private key cannot be loaded for the certificate chain.
    pub fn build(self) -> Result<ServerConfig> {
        crate::crypto::ensure_crypto_provider_installed();

        let verifier = Arc::new(TrustAnchorClientVerifier::new(self.trust_anchor.roots())?);
        let (cert_chain, private_key) = self.identity.into_parts();

        let mut cfg = ServerConfig::builder()
            .with_client_cert_verifier(verifier)
            .with_single_cert(cert_chain, private_key)
            .map_err(|e| Error::CertifiedKey(e.to_string()))?;
        cfg.alpn_protocols = self.alpn_protocols;

        debug!(
            "built mTLS server config ({} trust anchor(s))",
            self.trust_anchor.len()
        );
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bob_test_pki::TestPki;

    fn material(pki: &TestPki) -> (TrustAnchor, ServerIdentity) {
        let anchor = TrustAnchor::from_pem(pki.ca_pem().as_bytes()).unwrap();
        let server = pki.server();
        let identity =
            ServerIdentity::from_pem(server.cert_pem.as_bytes(), server.key_pem.as_bytes())
                .unwrap();
        (anchor, identity)
    }

    #[test]
    fn builds_config_without_alpn_by_default() {
        let pki = TestPki::generate();
        let (anchor, identity) = material(&pki);

        let cfg = ServerConfigBuilder::new(anchor, identity).build().unwrap();

        assert!(cfg.alpn_protocols.is_empty());
    }

    #[test]
    fn sets_alpn_protocols() {
        let pki = TestPki::generate();
        let (anchor, identity) = material(&pki);

        let cfg = crate::mtls_server(anchor, identity)
            .with_alpn_protocols([b"http/1.1"])
            .build()
            .unwrap();

        assert_eq!(cfg.alpn_protocols, vec![b"http/1.1".to_vec()]);
    }

    #[test]
    fn rejects_unusable_private_key() {
        let pki = TestPki::generate();
        let anchor = TrustAnchor::from_pem(pki.ca_pem().as_bytes()).unwrap();
        let identity = ServerIdentity::new(
            vec![pki.server().cert_der.clone()],
            rustls::pki_types::PrivatePkcs8KeyDer::from(vec![0u8; 16]).into(),
        )
        .unwrap();

        let err = ServerConfigBuilder::new(anchor, identity)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::CertifiedKey(_)));
    }
}
