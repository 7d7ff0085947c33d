//! Client certificate verification against the trust anchor.
//!
//! All decisions are delegated to rustls' WebPKI verifier with its default
//! settings: a client certificate is mandatory, the chain must lead to one of
//! the trust anchors, signatures and validity periods are checked, and no
//! revocation lists are consulted. This wrapper only adds diagnostics.

use crate::error::{Error, Result};
use crate::prelude::debug;
use rustls::client::danger::HandshakeSignatureValid;
use rustls::pki_types::{CertificateDer, UnixTime};
use rustls::server::danger::{ClientCertVerified, ClientCertVerifier};
use rustls::server::WebPkiClientVerifier;
use rustls::{DigitallySignedStruct, DistinguishedName, RootCertStore, SignatureScheme};
use std::fmt::{self, Debug};
use std::sync::Arc;

pub(crate) struct TrustAnchorClientVerifier {
    inner: Arc<dyn ClientCertVerifier>,
}

impl TrustAnchorClientVerifier {
    /// Builds the verifier. A process-wide crypto provider must be installed.
    pub(crate) fn new(roots: Arc<RootCertStore>) -> Result<Self> {
        let inner = WebPkiClientVerifier::builder(roots)
            .build()
            .map_err(|e| Error::VerifierBuilder(format!("{e:?}")))?;

        Ok(Self { inner })
    }
}

impl Debug for TrustAnchorClientVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustAnchorClientVerifier").finish_non_exhaustive()
    }
}

impl ClientCertVerifier for TrustAnchorClientVerifier {
    fn offer_client_auth(&self) -> bool {
        self.inner.offer_client_auth()
    }

    fn client_auth_mandatory(&self) -> bool {
        self.inner.client_auth_mandatory()
    }

    fn root_hint_subjects(&self) -> &[DistinguishedName] {
        self.inner.root_hint_subjects()
    }

    fn verify_client_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        now: UnixTime,
    ) -> std::result::Result<ClientCertVerified, rustls::Error> {
        self.inner
            .verify_client_cert(end_entity, intermediates, now)
            .inspect(|_| {
                debug!(
                    "client certificate verified ({} intermediate(s))",
                    intermediates.len()
                );
            })
            .inspect_err(|e| {
                debug!("client certificate rejected: {e}");
            })
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        self.inner
            .verify_tls12_signature(message, cert, dss)
            .inspect_err(|e| {
                debug!("client TLS 1.2 handshake signature rejected: {e}");
            })
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        self.inner
            .verify_tls13_signature(message, cert, dss)
            .inspect_err(|e| {
                debug!("client TLS 1.3 handshake signature rejected: {e}");
            })
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::TrustAnchor;
    use bob_test_pki::{Leaf, TestPki};

    fn verifier_for(pki: &TestPki) -> TrustAnchorClientVerifier {
        crate::crypto::ensure_crypto_provider_installed();
        let anchor = TrustAnchor::from_pem(pki.ca_pem().as_bytes()).unwrap();
        TrustAnchorClientVerifier::new(anchor.roots()).unwrap()
    }

    fn verify(verifier: &TrustAnchorClientVerifier, leaf: &Leaf) -> bool {
        verifier
            .verify_client_cert(&leaf.cert_der, &[], UnixTime::now())
            .is_ok()
    }

    #[test]
    fn client_auth_is_offered_and_mandatory() {
        let pki = TestPki::generate();
        let verifier = verifier_for(&pki);

        assert!(verifier.offer_client_auth());
        assert!(verifier.client_auth_mandatory());
        assert_eq!(verifier.root_hint_subjects().len(), 1);
        assert!(!verifier.supported_verify_schemes().is_empty());
    }

    #[test]
    fn accepts_client_signed_by_anchor() {
        let pki = TestPki::generate();
        let verifier = verifier_for(&pki);

        assert!(verify(&verifier, pki.client()));
    }

    #[test]
    fn rejects_self_signed_client() {
        let pki = TestPki::generate();
        let verifier = verifier_for(&pki);

        assert!(!verify(&verifier, &TestPki::foreign_client()));
    }

    #[test]
    fn rejects_client_from_another_ca() {
        let pki = TestPki::generate();
        let other = TestPki::generate();
        let verifier = verifier_for(&pki);

        assert!(!verify(&verifier, other.client()));
    }

    #[test]
    fn rejects_client_outside_validity_period() {
        let pki = TestPki::generate();
        let verifier = verifier_for(&pki);

        assert!(!verify(&verifier, pki.expired_client()));
        assert!(!verify(&verifier, pki.not_yet_valid_client()));
    }

    #[test]
    fn rejects_server_only_certificate() {
        let pki = TestPki::generate();
        let verifier = verifier_for(&pki);

        assert!(!verify(&verifier, pki.server()));
    }
}
