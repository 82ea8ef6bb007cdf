// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP plumbing shared by every provider facade.
//!
//! The library does not own an HTTP stack. Callers hand in a [`Transport`]
//! that performs authentication, retries and connection handling, and the
//! [`ApiClient`] turns each facade call into one request and maps the answer
//! onto the facade's documented return type.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::azure::Error as AzureError;
use crate::config::{CloudContext, Provider};
use crate::error::{CloudError, Result};
use crate::xml;

/// Service Management endpoint of the public Azure cloud.
pub const AZURE_MANAGEMENT_ENDPOINT: &str = "https://management.core.windows.net";

/// API version sent in `x-ms-version` when none is configured.
pub const DEFAULT_AZURE_API_VERSION: &str = "2015-04-01";

/// Header carrying the Service Management API version.
pub const AZURE_VERSION_HEADER: &str = "x-ms-version";

/// Header carrying the id of an asynchronous Azure request.
pub const AZURE_REQUEST_ID_HEADER: &str = "x-ms-request-id";

const XML_CONTENT_TYPE: &str = "application/xml";
const JSON_CONTENT_TYPE: &str = "application/json";

/// The HTTP collaborator that actually talks to a provider.
pub trait Transport: Send + Sync {
    /// Send one request and return the complete response.
    ///
    /// Only connection-level failures are errors; any HTTP status is a
    /// successful exchange.
    fn execute(&self, request: Request<Bytes>)
        -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<T: Transport> Transport for &T {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}

/// Endpoint and default headers of one provider account.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to.
    pub endpoint: Url,
    /// Headers added to every request.
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Configuration for an arbitrary REST endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Config`] if the endpoint is not an absolute URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CloudError::Config(format!("Invalid endpoint URL {endpoint:?}: {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(CloudError::Config(format!(
                "Endpoint {endpoint} cannot carry a path"
            )));
        }
        Ok(Self {
            endpoint,
            headers: Vec::new(),
        })
    }

    /// Configuration for the Azure Service Management API of a subscription.
    ///
    /// # Example
    ///
    /// ```
    /// use cloudlabs_api_rs::client::ClientConfig;
    ///
    /// let config = ClientConfig::azure("1234").unwrap();
    /// assert_eq!(config.endpoint.as_str(), "https://management.core.windows.net/1234");
    /// assert_eq!(config.header("x-ms-version"), Some("2015-04-01"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Config`] if the subscription id is empty.
    pub fn azure(subscription_id: &str) -> Result<Self> {
        Self::azure_at(AZURE_MANAGEMENT_ENDPOINT, subscription_id)
    }

    /// Azure configuration against a non-default management endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Config`] if the endpoint is invalid or the
    /// subscription id is empty.
    pub fn azure_at(endpoint: &str, subscription_id: &str) -> Result<Self> {
        if subscription_id.trim().is_empty() {
            return Err(CloudError::Config(
                "Azure requires a subscription id".to_string(),
            ));
        }
        let mut config = Self::new(endpoint)?;
        config
            .endpoint
            .path_segments_mut()
            .map_err(|()| CloudError::Config(format!("Endpoint {endpoint} cannot carry a path")))?
            .pop_if_empty()
            .push(subscription_id);
        Ok(config.with_api_version(DEFAULT_AZURE_API_VERSION))
    }

    /// Build the configuration of a named context.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Config`] if the context is incomplete.
    pub fn from_context(context: &CloudContext) -> Result<Self> {
        let mut config = match context.provider {
            Provider::Azure => {
                let subscription = context.subscription_id.as_deref().ok_or_else(|| {
                    CloudError::Config("Azure context has no subscription_id".to_string())
                })?;
                let config = Self::azure_at(&context.endpoint, subscription)?;
                match &context.api_version {
                    Some(version) => config.with_api_version(version.clone()),
                    None => config,
                }
            }
            _ => Self::new(&context.endpoint)?,
        };
        if let Some(token) = &context.token {
            config = config.with_header(context.provider.token_header(), token.clone());
        }
        Ok(config)
    }

    /// Add or replace a default header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Set the `x-ms-version` header.
    #[must_use]
    pub fn with_api_version(self, version: impl Into<String>) -> Self {
        self.with_header(AZURE_VERSION_HEADER, version)
    }

    /// Value of a default header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Request body of a call.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    Empty,
    Xml(String),
    Json(String),
}

/// One facade call: method, path below the endpoint, query and body.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    payload: Payload,
}

impl Call {
    /// Call with an arbitrary method.
    #[must_use]
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    #[must_use]
    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments)
    }

    #[must_use]
    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::POST, segments)
    }

    #[must_use]
    pub fn put(segments: &[&str]) -> Self {
        Self::new(Method::PUT, segments)
    }

    #[must_use]
    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Attach an XML body.
    #[must_use]
    pub fn with_xml(mut self, body: String) -> Self {
        self.payload = Payload::Xml(body);
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: String) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    /// HTTP method of the call.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Body of the call.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Sends calls through a [`Transport`] and applies the fallback contracts.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL of a call. Path segments are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Config`] if the endpoint cannot carry a path.
    pub fn url(&self, call: &Call) -> Result<Url> {
        let mut url = self.config.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CloudError::Config(format!("Endpoint {} cannot carry a path", self.config.endpoint))
            })?
            .pop_if_empty()
            .extend(&call.segments);
        if !call.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&call.query);
        }
        Ok(url)
    }

    /// Assemble the HTTP request of a call.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or a header is invalid.
    pub fn request(&self, call: &Call) -> Result<Request<Bytes>> {
        let url = self.url(call)?;
        let mut builder = Request::builder()
            .method(call.method.clone())
            .uri(url.as_str());
        for (name, value) in &self.config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let body = match &call.payload {
            Payload::Empty => Bytes::new(),
            Payload::Xml(body) => {
                builder = builder
                    .header(CONTENT_TYPE, XML_CONTENT_TYPE)
                    .header(ACCEPT, XML_CONTENT_TYPE);
                Bytes::from(body.clone())
            }
            Payload::Json(body) => {
                builder = builder
                    .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                    .header(ACCEPT, JSON_CONTENT_TYPE);
                Bytes::from(body.clone())
            }
        };
        Ok(builder.body(body)?)
    }

    /// Send a call and return the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the transport fails.
    pub async fn send(&self, call: &Call) -> Result<Response<Bytes>> {
        let request = self.request(call)?;
        trace!(method = %request.method(), uri = %request.uri(), "sending request");
        let response = self.transport.execute(request).await?;
        debug!(
            method = %call.method,
            status = response.status().as_u16(),
            "received response"
        );
        Ok(response)
    }

    /// Send a call and parse a successful body.
    ///
    /// # Errors
    ///
    /// Any non-2xx answer becomes [`CloudError::Provider`].
    pub async fn fetch<R>(&self, call: &Call, parse: impl FnOnce(&[u8]) -> Result<R>) -> Result<R> {
        let response = self.send(call).await?;
        if response.status().is_success() {
            parse(response.body())
        } else {
            Err(provider_error(&response))
        }
    }

    /// Send a call; a 404 answer is `None`.
    ///
    /// # Errors
    ///
    /// Other non-2xx answers become [`CloudError::Provider`]; a body that
    /// does not parse is a malformed-document error.
    pub async fn get_or_none<R>(
        &self,
        call: &Call,
        parse: impl FnOnce(&[u8]) -> Result<R>,
    ) -> Result<Option<R>> {
        let response = self.send(call).await?;
        match response.status() {
            status if status.is_success() => parse(response.body()).map(Some),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(provider_error(&response)),
        }
    }

    /// Send a call; a 404 answer is an empty list.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_or_none`].
    pub async fn list_or_empty<R>(
        &self,
        call: &Call,
        parse: impl FnOnce(&[u8]) -> Result<Vec<R>>,
    ) -> Result<Vec<R>> {
        Ok(self.get_or_none(call, parse).await?.unwrap_or_default())
    }

    /// Send an asynchronous Azure operation; returns its request id, or
    /// `None` if the target does not exist.
    ///
    /// # Errors
    ///
    /// Other non-2xx answers become [`CloudError::Provider`].
    pub async fn accepted_or_none(&self, call: &Call) -> Result<Option<String>> {
        let response = self.send(call).await?;
        match response.status() {
            status if status.is_success() => Ok(Some(request_id(&response))),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(provider_error(&response)),
        }
    }

    /// Send an asynchronous Azure operation that has no absent case, such
    /// as a create; returns its request id.
    ///
    /// # Errors
    ///
    /// Every non-2xx answer becomes [`CloudError::Provider`].
    pub async fn accepted(&self, call: &Call) -> Result<String> {
        let response = self.send(call).await?;
        if response.status().is_success() {
            Ok(request_id(&response))
        } else {
            Err(provider_error(&response))
        }
    }

    /// Send a call whose outcome is a flag: 2xx is `true`, 404 is `false`.
    ///
    /// # Errors
    ///
    /// Other non-2xx answers become [`CloudError::Provider`].
    pub async fn succeeded(&self, call: &Call) -> Result<bool> {
        let response = self.send(call).await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(provider_error(&response)),
        }
    }
}

/// Decode a JSON response body.
///
/// # Errors
///
/// Returns [`CloudError::Json`] when the body does not match `R`.
pub fn parse_json<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    Ok(serde_json::from_slice(body)?)
}

/// Encode a JSON request body.
///
/// # Errors
///
/// Returns [`CloudError::Json`] if `value` cannot be serialized.
pub fn to_json<S: Serialize>(value: &S) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Request id of an accepted operation; empty when the header is missing.
fn request_id(response: &Response<Bytes>) -> String {
    response
        .headers()
        .get(AZURE_REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Map a failed answer onto [`CloudError::Provider`], keeping the Azure
/// fault document when the body carries one.
pub(crate) fn provider_error(response: &Response<Bytes>) -> CloudError {
    let body = response.body();
    CloudError::Provider {
        status: response.status().as_u16(),
        error: xml::parse::<AzureError>(body).ok(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

#[cfg(test)]
mod tests;
