//! Forwards everything the dev server doesn't serve itself to the
//! application server.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};

/// Largest request body forwarded upstream.
const MAX_REQUEST_BODY: usize = 32 * 1024 * 1024;

/// Connection-scoped headers never forwarded in either direction.
static HOP_BY_HOP: [HeaderName; 6] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
];

#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        // redirects go back to the browser so it stays on the dev server
        let client = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build()?;
        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn forwardable(headers: &HeaderMap) -> impl Iterator<Item = (&HeaderName, &axum::http::HeaderValue)> {
    headers
        .iter()
        .filter(|(name, _)| {
            !HOP_BY_HOP.contains(*name) && **name != header::HOST && name.as_str() != "keep-alive"
        })
}

pub async fn forward(State(upstream): State<Upstream>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path_and_query().map_or("/", |p| p.as_str());
    let url = format!("{}{path}", upstream.base_url);

    let body = match axum::body::to_bytes(body, MAX_REQUEST_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Request body for {path} not forwarded: {e}");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        },
    };

    let mut outgoing = upstream.client.request(parts.method.clone(), &url).body(body);
    for (name, value) in forwardable(&parts.headers) {
        outgoing = outgoing.header(name.clone(), value.clone());
    }

    let upstream_response = match outgoing.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("{} {url} failed: {e}", parts.method);
            return (
                StatusCode::BAD_GATEWAY,
                format!("Application server at {} is not reachable", upstream.base_url),
            )
                .into_response();
        },
    };

    let mut response = Response::builder().status(upstream_response.status());
    for (name, value) in forwardable(upstream_response.headers()) {
        response = response.header(name.clone(), value.clone());
    }
    response.body(Body::from_stream(upstream_response.bytes_stream())).unwrap_or_else(|e| {
        tracing::error!("Failed to build proxied response: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Proxy error").into_response()
    })
}
