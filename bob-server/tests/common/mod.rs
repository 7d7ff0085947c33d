#![allow(dead_code)]

use bob_server::{Server, Settings};
use bob_test_pki::{server_name, TestPki};
use bytes::Bytes;
use http_body_util::{BodyExt as _, Full};
use hyper::client::conn::http1::SendRequest;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio_rustls::rustls::ClientConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A running server backed by a fresh PKI written to a temp directory.
pub struct TestServer {
    pub pki: TestPki,
    pub addr: SocketAddr,
    pub url: String,
    _dir: TempDir,
}

pub async fn start() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let pki = TestPki::generate();
    pki.write_to(dir.path()).unwrap();

    let server = Server::bind(&Settings::in_dir(dir.path()).with_port(0))
        .await
        .unwrap();
    let addr = server.local_addr();
    let url = server.url();
    tokio::spawn(server.run());

    TestServer {
        pki,
        addr,
        url,
        _dir: dir,
    }
}

/// Opens a TLS connection and an HTTP/1 client over it.
pub async fn connect(
    addr: SocketAddr,
    client_config: ClientConfig,
) -> Result<SendRequest<Full<Bytes>>, BoxError> {
    let tcp = TcpStream::connect(addr).await?;
    let tls = TlsConnector::from(Arc::new(client_config))
        .connect(server_name(), tcp)
        .await?;

    let (sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(tls)).await?;
    tokio::spawn(conn);
    Ok(sender)
}

/// Sends one request and buffers the whole response.
pub async fn send(
    sender: &mut SendRequest<Full<Bytes>>,
    request: Request<Full<Bytes>>,
) -> Result<Response<Bytes>, BoxError> {
    sender.ready().await?;
    let response = sender.send_request(request).await?;
    let (parts, body) = response.into_parts();
    let body = body.collect().await?.to_bytes();
    Ok(Response::from_parts(parts, body))
}

/// Connects, sends one request, returns the response.
pub async fn request_once(
    addr: SocketAddr,
    client_config: ClientConfig,
    request: Request<Full<Bytes>>,
) -> Result<Response<Bytes>, BoxError> {
    let mut sender = connect(addr, client_config).await?;
    send(&mut sender, request).await
}

pub fn get(path: &str) -> Request<Full<Bytes>> {
    Request::get(path)
        .header(hyper::header::HOST, "localhost")
        .body(Full::new(Bytes::new()))
        .unwrap()
}
