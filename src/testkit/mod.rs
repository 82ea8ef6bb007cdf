// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted transport for exercising facades without a network.
//!
//! Responses are keyed by method and path-and-query. Every request that
//! reaches the transport is recorded so tests can compare the serialized
//! request against a golden payload.
//!
//! ```
//! use cloudlabs_api_rs::testkit::{MockResponse, MockTransport};
//!
//! let transport = MockTransport::new()
//!     .with_route("GET", "/1234/services/hostedservices", MockResponse::ok("<HostedServices/>"));
//! assert!(transport.requests().is_empty());
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response};

use crate::client::{Transport, AZURE_REQUEST_ID_HEADER};
use crate::error::{CloudError, Result};

/// Canned answer for one route.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl MockResponse {
    /// 200 with a body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::status(200).with_body(body)
    }

    /// 202 carrying an Azure request id.
    #[must_use]
    pub fn accepted(request_id: &str) -> Self {
        Self::status(202).with_header(AZURE_REQUEST_ID_HEADER, request_id)
    }

    /// Empty answer with the given status.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    fn to_response(&self) -> Result<Response<Bytes>> {
        let mut builder = Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        Ok(builder.body(self.body.clone())?)
    }
}

/// A request as it reached the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path and query of the request URI.
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// In-memory [`Transport`] answering from a route table.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(String, String), MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path_and_query` with `response`, every time it is hit.
    #[must_use]
    pub fn with_route(self, method: &str, path: &str, response: MockResponse) -> Self {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method.to_uppercase(), path.to_string()), response);
        self
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn answer(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let path = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default();
        let key = (request.method().as_str().to_string(), path.clone());

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: request.method().clone(),
                path: path.clone(),
                headers: request.headers().clone(),
                body: String::from_utf8_lossy(request.body()).into_owned(),
            });

        let routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        match routes.get(&key) {
            Some(response) => response.to_response(),
            None => Err(CloudError::Transport(format!(
                "no mock route for {} {}",
                key.0, path
            ))),
        }
    }
}

impl Transport for MockTransport {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        let result = self.answer(request);
        async move { result }
    }
}
