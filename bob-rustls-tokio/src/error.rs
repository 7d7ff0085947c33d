//! Error types for `bob-rustls-tokio`.

use thiserror::Error;

/// Errors returned by `bob-rustls-tokio`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred.
    ///
    /// `tokio-rustls` reports handshake failures, including a rejected or
    /// missing client certificate, as I/O errors wrapping a [`rustls::Error`];
    /// see [`Error::tls_error`].
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The verified peer certificate could not be parsed.
    #[error("failed parsing peer certificate: {0}")]
    CertParse(String),

    /// The handshake completed without a peer certificate.
    ///
    /// Unreachable with a `bob-rustls` config, which makes client
    /// certificates mandatory.
    #[error("peer presented no certificate")]
    MissingPeerCertificate,
}

impl Error {
    /// The TLS-layer cause, when the handshake itself failed.
    pub fn tls_error(&self) -> Option<&rustls::Error> {
        match self {
            Self::Io(e) => e
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<rustls::Error>()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::io;

    #[test]
    fn tls_error_unwraps_rustls_cause() {
        let err = Error::from(io::Error::new(
            io::ErrorKind::InvalidData,
            rustls::Error::NoCertificatesPresented,
        ));

        assert_eq!(
            err.tls_error(),
            Some(&rustls::Error::NoCertificatesPresented)
        );
    }

    #[test]
    fn tls_error_is_none_for_plain_io() {
        let err = Error::from(io::Error::from(io::ErrorKind::ConnectionReset));
        assert!(err.tls_error().is_none());
        assert!(Error::MissingPeerCertificate.tls_error().is_none());
    }
}
