use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{Request, Response};

/// Body of every response.
pub const GREETING: &str = "Welcome to Bob's server!";

/// `Content-Type` of every response.
pub const CONTENT_TYPE: &str = "text/plain";

/// Answers any request, whatever its method, path, headers or body, with
/// `200 OK` and [`GREETING`].
pub fn respond<B>(_request: Request<B>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(GREETING.as_bytes())));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    response
}
