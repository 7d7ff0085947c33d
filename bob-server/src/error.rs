/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Startup errors. Per-connection failures are logged, never returned.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Key material could not be loaded or assembled into a TLS config.
    #[error(transparent)]
    Tls(#[from] bob_rustls::Error),

    /// The listen address could not be bound.
    #[error("failed binding {addr}: {source}")]
    Bind {
        /// The `host:port` that was requested.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
