#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # bob-server
//!
//! An HTTPS endpoint that only talks to clients holding a certificate issued
//! by its CA.
//!
//! On startup the server loads `ca.crt`, `bob_server.crt` and `bob_server.key`,
//! then listens on `127.0.0.1:3000`. Every connection must complete a mutual
//! TLS handshake; clients without a certificate, or with one that does not
//! chain to `ca.crt` or is outside its validity period, are dropped at the TLS
//! layer. Authenticated clients get `200 OK` and `Welcome to Bob's server!`
//! for any HTTP/1.1 request.

mod error;
mod responder;
mod server;
mod settings;

pub use error::{Error, Result};
pub use responder::{respond, CONTENT_TYPE, GREETING};
pub use server::Server;
pub use settings::{
    Settings, CA_FILE, DEFAULT_HOST, DEFAULT_PORT, SERVER_CERT_FILE, SERVER_KEY_FILE,
};
