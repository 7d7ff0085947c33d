#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # bob-rustls
//!
//! `bob-rustls` builds a [`rustls::ServerConfig`] for mutual TLS from PEM key
//! material on disk:
//!
//! * a **trust anchor**: the CA bundle client certificates must chain to,
//! * a **server identity**: the certificate chain and private key presented
//!   to clients.
//!
//! The resulting configuration always requests a client certificate and
//! rejects the handshake when none is presented or when it fails standard
//! WebPKI chain validation (signature, validity period, path to the anchor).
//! Revocation is not checked.
//!
//! The crate is runtime agnostic; pair it with `bob-rustls-tokio` or any other
//! rustls integration.
//!
//! ## Feature flags
//!
//! Exactly **one** `rustls` crypto provider must be enabled:
//!
//! * `ring` (default)
//! * `aws-lc-rs`
//!
//! Diagnostics go through `log` (`logging`, default) or `tracing` (`tracing`).

#[cfg(all(feature = "ring", feature = "aws-lc-rs"))]
compile_error!("Enable only one crypto provider feature: `ring` or `aws-lc-rs`.");

#[cfg(not(any(feature = "ring", feature = "aws-lc-rs")))]
compile_error!("Enable one crypto provider feature: `ring` (default) or `aws-lc-rs`.");

mod crypto;
mod error;
mod material;

mod observability;
mod prelude;

mod server;
mod verifier;

// Public re-exports
pub use error::{Error, Result};
pub use material::{load_server_identity, load_trust_anchor, ServerIdentity, TrustAnchor};
pub use server::ServerConfigBuilder;

/// Constructor for the mTLS server builder.
///
/// # Examples
///
/// ```no_run
/// use bob_rustls::{load_server_identity, load_trust_anchor, mtls_server};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let trust_anchor = load_trust_anchor("ca.crt")?;
/// let identity = load_server_identity("bob_server.crt", "bob_server.key")?;
///
/// let server_config = mtls_server(trust_anchor, identity)
///     .with_alpn_protocols([b"http/1.1"])
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub fn mtls_server(trust_anchor: TrustAnchor, identity: ServerIdentity) -> ServerConfigBuilder {
    ServerConfigBuilder::new(trust_anchor, identity)
}
