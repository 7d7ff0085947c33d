//! Peer identity extraction from TLS connections.

use crate::error::Error;
use rustls::pki_types::CertificateDer;
use rustls::server::ServerConnection;
use x509_parser::prelude::*;

/// Identity of a client whose certificate passed chain validation.
///
/// Taken from the leaf (first) certificate the client presented. The values
/// are informational: by the time a `PeerIdentity` exists, the handshake has
/// already authenticated the client against the trust anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerIdentity {
    subject: String,
    common_name: Option<String>,
    serial: String,
}

impl PeerIdentity {
    /// The subject distinguished name, e.g. `CN=alice`.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The first common name in the subject, if any.
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    /// The serial number as colon-separated hex.
    pub fn serial(&self) -> &str {
        &self.serial
    }
}

/// Extracts the client identity from a server connection's peer certificates.
pub(crate) fn extract_peer_identity(connection: &ServerConnection) -> Result<PeerIdentity, Error> {
    extract_peer_identity_impl(connection.peer_certificates())
}

fn extract_peer_identity_impl(
    peer_certs: Option<&[CertificateDer<'_>]>,
) -> Result<PeerIdentity, Error> {
    let leaf = peer_certs
        .and_then(|certs| certs.first())
        .ok_or(Error::MissingPeerCertificate)?;

    let (_, cert) =
        parse_x509_certificate(leaf.as_ref()).map_err(|e| Error::CertParse(e.to_string()))?;

    let common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_owned);

    Ok(PeerIdentity {
        subject: cert.subject().to_string(),
        common_name,
        serial: cert.raw_serial_as_string(),
    })
}
