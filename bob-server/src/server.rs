use crate::error::{Error, Result};
use crate::responder::respond;
use crate::settings::Settings;
use bob_rustls::{load_server_identity, load_trust_anchor, mtls_server};
use bob_rustls_tokio::TlsAcceptor;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use log::{debug, info, warn};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// A bound mTLS listener, ready to [`run`](Server::run).
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    acceptor: TlsAcceptor,
    host: String,
    local_addr: SocketAddr,
}

impl Server {
    /// Loads the key material named by `settings`, then binds the listener.
    ///
    /// Nothing is bound unless all three files load and form a valid TLS
    /// configuration.
    ///
    /// ## Errors
    ///
    /// * [`Error::Tls`] if a file is missing or its contents are rejected,
    /// * [`Error::Bind`] if the address cannot be bound (e.g. port in use).
    pub async fn bind(settings: &Settings) -> Result<Self> {
        let trust_anchor = load_trust_anchor(&settings.ca_path)?;
        let identity = load_server_identity(&settings.cert_path, &settings.key_path)?;

        let tls_config = mtls_server(trust_anchor, identity)
            .with_alpn_protocols([b"http/1.1"])
            .build()?;

        let addr = format!("{}:{}", settings.host, settings.port);
        let bind_error = |source: std::io::Error| Error::Bind {
            addr: addr.clone(),
            source,
        };

        let listener = TcpListener::bind((settings.host.as_str(), settings.port))
            .await
            .map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;
        info!("listening on {local_addr}");

        Ok(Self {
            listener,
            acceptor: TlsAcceptor::new(Arc::new(tls_config)),
            host: settings.host.clone(),
            local_addr,
        })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `https://{host}:{port}/` for the configured host and the bound port.
    pub fn url(&self) -> String {
        let port = self.local_addr.port();
        if self.host.contains(':') {
            format!("https://[{}]:{port}/", self.host)
        } else {
            format!("https://{}:{port}/", self.host)
        }
    }

    /// Accepts connections until the process ends.
    ///
    /// Each connection is served on its own task; a failed handshake or
    /// accept only affects that connection.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((tcp, peer)) => {
                    tokio::spawn(serve_connection(self.acceptor.clone(), tcp, peer));
                }
                Err(e) => warn!("failed accepting connection: {e}"),
            }
        }
    }
}

async fn serve_connection(acceptor: TlsAcceptor, tcp: TcpStream, peer: SocketAddr) {
    let (tls, identity) = match acceptor.accept(tcp).await {
        Ok(accepted) => accepted,
        Err(e) => {
            debug!("rejected TLS connection from {peer}: {e}");
            return;
        }
    };
    debug!("TLS handshake OK from {peer} ({})", identity.subject());

    let service =
        service_fn(|request: Request<Incoming>| async move { Ok::<_, Infallible>(respond(request)) });

    if let Err(e) = http1::Builder::new()
        .serve_connection(TokioIo::new(tls), service)
        .await
    {
        debug!("error serving {peer}: {e}");
    }
}
