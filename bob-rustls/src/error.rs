use std::path::PathBuf;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `bob-rustls`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A key material file could not be read.
    #[error("failed reading {}: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A key material file was read but its contents were rejected.
    #[error("invalid key material in {}: {source}", path.display())]
    Material {
        /// The offending file.
        path: PathBuf,
        /// Why the contents were rejected.
        #[source]
        source: Box<Error>,
    },

    /// PEM data was malformed.
    #[error("malformed PEM: {0}")]
    Pem(#[source] std::io::Error),

    /// No `CERTIFICATE` blocks were found.
    #[error("no certificates found")]
    NoCertificates,

    /// No private key block (PKCS#8, PKCS#1 or SEC1) was found.
    #[error("no private key found")]
    NoPrivateKey,

    /// None of the CA certificates could be used as a trust anchor.
    #[error("no usable trust anchors ({ignored} certificate(s) rejected)")]
    NoTrustAnchors {
        /// Number of certificates that failed to parse as trust anchors.
        ignored: usize,
    },

    /// The server certificate chain and private key could not be combined.
    #[error("failed building server certified key: {0}")]
    CertifiedKey(String),

    /// Failed to build the client certificate verifier.
    #[error("rustls verifier builder error: {0}")]
    VerifierBuilder(String),
}
