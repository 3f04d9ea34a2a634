//! `fetch`-backed transport for the session gateway.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests, tooling): a stub that always reports the transport
//! as unavailable, so nothing panics outside the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only "no response" conditions become [`TransportError`]. Any HTTP status,
//! including 4xx/5xx, is returned as a response for the gateway to classify.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use session::{HttpRequest, HttpResponse, TransportError};

/// Transport over the browser `fetch` API.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

fn failure(stage: &str, reason: impl std::fmt::Display) -> TransportError {
    TransportError(format!("{stage} failed: {reason}"))
}

#[cfg(feature = "csr")]
fn gloo_method(method: session::Method) -> gloo_net::http::Method {
    use gloo_net::http::Method as M;
    match method {
        session::Method::Get => M::GET,
        session::Method::Post => M::POST,
        session::Method::Put => M::PUT,
        session::Method::Patch => M::PATCH,
        session::Method::Delete => M::DELETE,
    }
}

#[async_trait(?Send)]
impl session::Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            let mut builder = gloo_net::http::RequestBuilder::new(&request.url)
                .method(gloo_method(request.method));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let outgoing = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| failure("request build", e))?;

            let response = outgoing.send().await.map_err(|e| failure("fetch", e))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| failure("response read", e))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(failure(request.method.as_str(), "browser transport is not available"))
        }
    }
}
