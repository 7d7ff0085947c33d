//! TLS acceptor for server-side connections.

use crate::error::Error;
use crate::identity::{extract_peer_identity, PeerIdentity};
use rustls::ServerConfig;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_rustls::server::TlsStream;
use tokio_rustls::TlsAcceptor as TokioTlsAcceptor;

/// A TLS acceptor that reports the verified client identity.
///
/// Wrapper around [`tokio_rustls::TlsAcceptor`]. Cloning is cheap; clone one per
/// accepted connection.
///
/// # Example
///
/// ```no_run
/// # use bob_rustls_tokio::TlsAcceptor;
/// # use std::sync::Arc;
/// # use tokio::net::TcpListener;
/// # async fn example(server_config: rustls::ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let acceptor = TlsAcceptor::new(Arc::new(server_config));
/// let listener = TcpListener::bind("127.0.0.1:3000").await?;
///
/// loop {
///     let (stream, _) = listener.accept().await?;
///     let acceptor = acceptor.clone();
///
///     tokio::spawn(async move {
///         match acceptor.accept(stream).await {
///             Ok((tls_stream, peer)) => {
///                 println!("Connected peer: {}", peer.subject());
///                 // Use tls_stream...
///             }
///             Err(e) => eprintln!("TLS connection failed: {e}"),
///         }
///     });
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct TlsAcceptor {
    inner: TokioTlsAcceptor,
}

impl std::fmt::Debug for TlsAcceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsAcceptor").finish_non_exhaustive()
    }
}

impl TlsAcceptor {
    /// Creates a new `TlsAcceptor` from a `ServerConfig`.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self::from(config)
    }

    /// Performs the server side of the TLS handshake over `stream`.
    ///
    /// On success, returns the TLS stream together with the identity parsed
    /// from the client's leaf certificate.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the handshake fails, including when the client
    ///   certificate is missing or rejected ([`Error::tls_error`] holds the cause)
    /// - [`Error::CertParse`] if the verified leaf certificate cannot be parsed
    /// - [`Error::MissingPeerCertificate`] if the config did not require one
    pub async fn accept<IO>(&self, stream: IO) -> Result<(TlsStream<IO>, PeerIdentity), Error>
    where
        IO: AsyncRead + AsyncWrite + Unpin,
    {
        let tls_stream = self.inner.accept(stream).await?;

        let (_io, server_conn) = tls_stream.get_ref();
        let peer_identity = extract_peer_identity(server_conn)?;

        Ok((tls_stream, peer_identity))
    }
}

impl From<Arc<ServerConfig>> for TlsAcceptor {
    fn from(config: Arc<ServerConfig>) -> Self {
        Self {
            inner: TokioTlsAcceptor::from(config),
        }
    }
}
