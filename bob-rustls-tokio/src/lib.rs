#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # bob-rustls-tokio
//!
//! Tokio-native accept helper for [bob-rustls](https://docs.rs/bob-rustls) server configs.
//!
//! Wraps `tokio-rustls` and, after a successful mutual TLS handshake, parses the
//! client's leaf certificate into a [`PeerIdentity`]. Runtime-agnostic TLS
//! configuration remains in `bob-rustls`.
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use bob_rustls::{load_server_identity, load_trust_anchor, mtls_server};
//! use bob_rustls_tokio::TlsAcceptor;
//! use std::sync::Arc;
//!
//! let server_config = mtls_server(
//!     load_trust_anchor("ca.crt")?,
//!     load_server_identity("bob_server.crt", "bob_server.key")?,
//! )
//! .build()?;
//!
//! let acceptor = TlsAcceptor::new(Arc::new(server_config));
//! # Ok(())
//! # }
//! ```

mod acceptor;
mod error;
mod identity;

pub use acceptor::TlsAcceptor;
pub use error::Error;
pub use identity::PeerIdentity;
