// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request logging for provider transports.
//!
//! [`LoggingTransport`] wraps any [`Transport`] and logs every exchange with
//! its method, path, status and elapsed time. Sensitive headers are redacted.
//!
//! # Example
//!
//! ```
//! use cloudlabs_api_rs::client::{ApiClient, ClientConfig};
//! use cloudlabs_api_rs::runtime::{LoggingConfig, LoggingTransport, LogLevel};
//! use cloudlabs_api_rs::testkit::MockTransport;
//!
//! let transport = LoggingTransport::with_config(
//!     MockTransport::new(),
//!     LoggingConfig::new().with_success_level(LogLevel::Debug),
//! );
//! let client = ApiClient::new(transport, ClientConfig::azure("1234").unwrap());
//! assert_eq!(client.transport().logger().metrics().total_requests(), 0);
//! ```

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use bytes::Bytes;
use http::{HeaderMap, Request, Response};
use tracing::{debug, error, info, trace, warn};

use crate::client::Transport;
use crate::error::Result;

/// Log level for request logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level - most verbose.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warn level.
    Warn,
    /// Error level - only errors.
    Error,
    /// Disabled - no logging.
    Off,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

fn default_sensitive_headers() -> Vec<String> {
    vec![
        "authorization".to_string(),
        "x-ms-authorization".to_string(),
        "x-auth-token".to_string(),
        "x-token".to_string(),
    ]
}

/// Configuration for request logging.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for successful requests.
    pub success_level: LogLevel,
    /// Log level for failed requests.
    pub error_level: LogLevel,
    /// Whether to log request headers.
    pub log_headers: bool,
    /// Whether to log request path.
    pub log_path: bool,
    /// Whether to redact sensitive headers.
    pub redact_sensitive: bool,
    /// List of sensitive header names to redact.
    pub sensitive_headers: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            success_level: LogLevel::Info,
            error_level: LogLevel::Error,
            log_headers: false,
            log_path: true,
            redact_sensitive: true,
            sensitive_headers: default_sensitive_headers(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the success log level.
    #[must_use]
    pub fn with_success_level(mut self, level: LogLevel) -> Self {
        self.success_level = level;
        self
    }

    /// Set the error log level.
    #[must_use]
    pub fn with_error_level(mut self, level: LogLevel) -> Self {
        self.error_level = level;
        self
    }

    /// Enable or disable header logging.
    #[must_use]
    pub fn with_headers(mut self, enabled: bool) -> Self {
        self.log_headers = enabled;
        self
    }

    /// Enable or disable path logging.
    #[must_use]
    pub fn with_path(mut self, enabled: bool) -> Self {
        self.log_path = enabled;
        self
    }

    /// Enable or disable sensitive data redaction.
    #[must_use]
    pub fn with_redaction(mut self, enabled: bool) -> Self {
        self.redact_sensitive = enabled;
        self
    }

    /// Add a sensitive header to redact.
    #[must_use]
    pub fn with_sensitive_header(mut self, header: impl Into<String>) -> Self {
        self.sensitive_headers.push(header.into());
        self
    }

    /// Create a verbose configuration for debugging.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            success_level: LogLevel::Debug,
            log_headers: true,
            ..Self::default()
        }
    }

    /// Create a quiet configuration for production.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            success_level: LogLevel::Off,
            error_level: LogLevel::Warn,
            ..Self::default()
        }
    }

    fn is_sensitive(&self, name: &str) -> bool {
        self.redact_sensitive
            && self
                .sensitive_headers
                .iter()
                .any(|h| h.eq_ignore_ascii_case(name))
    }

    /// Render headers for a log line, redacting sensitive values.
    #[must_use]
    pub fn render_headers(&self, headers: &HeaderMap) -> String {
        let parts: Vec<String> = headers
            .iter()
            .map(|(name, value)| {
                if self.is_sensitive(name.as_str()) {
                    format!("{}=[REDACTED]", name)
                } else {
                    format!("{}={:?}", name, value)
                }
            })
            .collect();
        parts.join(", ")
    }
}

/// Counters kept by the request logger.
#[derive(Debug, Default)]
pub struct TransportMetrics {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
}

impl TransportMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful exchange.
    pub fn record_success(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed exchange.
    pub fn record_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn successful_requests(&self) -> u64 {
        self.successful_requests.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed_requests(&self) -> u64 {
        self.failed_requests.load(Ordering::Relaxed)
    }

    /// Get the success rate (0.0 to 1.0).
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        let total = self.total_requests.load(Ordering::Relaxed);
        if total == 0 {
            return 1.0;
        }
        let successful = self.successful_requests.load(Ordering::Relaxed);
        successful as f64 / total as f64
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.total_requests.store(0, Ordering::Relaxed);
        self.successful_requests.store(0, Ordering::Relaxed);
        self.failed_requests.store(0, Ordering::Relaxed);
    }
}

fn emit(level: LogLevel, msg: &str) {
    match level {
        LogLevel::Trace => trace!(target: "cloudlabs_api::http", "{}", msg),
        LogLevel::Debug => debug!(target: "cloudlabs_api::http", "{}", msg),
        LogLevel::Info => info!(target: "cloudlabs_api::http", "{}", msg),
        LogLevel::Warn => warn!(target: "cloudlabs_api::http", "{}", msg),
        LogLevel::Error => error!(target: "cloudlabs_api::http", "{}", msg),
        LogLevel::Off => {}
    }
}

/// A request logger that tracks timing and logs outcomes.
#[derive(Debug, Default)]
pub struct RequestLogger {
    config: LoggingConfig,
    metrics: TransportMetrics,
}

impl RequestLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: LoggingConfig) -> Self {
        Self {
            config,
            metrics: TransportMetrics::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &TransportMetrics {
        &self.metrics
    }

    /// Start tracking a request.
    #[must_use]
    pub fn start(&self, method: &str, path: &str) -> RequestSpan {
        RequestSpan {
            method: method.to_string(),
            path: path.to_string(),
            start: Instant::now(),
        }
    }

    fn describe(&self, span: &RequestSpan) -> String {
        if self.config.log_path {
            format!("{} {}", span.method, span.path)
        } else {
            span.method.clone()
        }
    }

    /// Finish tracking a request that got an HTTP answer.
    ///
    /// 4xx and 5xx answers count as failures.
    pub fn finish_status(&self, span: RequestSpan, status: u16) {
        if status >= 400 {
            self.finish_error(span, &format!("HTTP {status}"));
            return;
        }
        self.metrics.record_success();
        if self.config.success_level == LogLevel::Off {
            return;
        }
        let msg = format!(
            "HTTP response: {} -> {} in {:?}",
            self.describe(&span),
            status,
            span.elapsed()
        );
        emit(self.config.success_level, &msg);
    }

    /// Finish tracking a request that failed.
    pub fn finish_error(&self, span: RequestSpan, error: &str) {
        self.metrics.record_failure();
        if self.config.error_level == LogLevel::Off {
            return;
        }
        let msg = format!(
            "HTTP error: {} failed in {:?}: {}",
            self.describe(&span),
            span.elapsed(),
            error
        );
        emit(self.config.error_level, &msg);
    }
}

/// A span representing an in-flight request.
#[derive(Debug)]
pub struct RequestSpan {
    method: String,
    path: String,
    start: Instant,
}

impl RequestSpan {
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the elapsed time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

/// A [`Transport`] decorator that logs every exchange.
#[derive(Debug)]
pub struct LoggingTransport<T> {
    inner: T,
    logger: RequestLogger,
}

impl<T: Transport> LoggingTransport<T> {
    /// Wrap a transport with the default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, LoggingConfig::default())
    }

    /// Wrap a transport with a custom configuration.
    pub fn with_config(inner: T, config: LoggingConfig) -> Self {
        Self {
            inner,
            logger: RequestLogger::with_config(config),
        }
    }

    #[must_use]
    pub fn logger(&self) -> &RequestLogger {
        &self.logger
    }

    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport> Transport for LoggingTransport<T> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        let path = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default();
        let span = self.logger.start(request.method().as_str(), &path);
        let config = self.logger.config();
        if config.log_headers && config.success_level != LogLevel::Off {
            let msg = format!(
                "HTTP request: {} {} headers=[{}]",
                span.method(),
                span.path(),
                config.render_headers(request.headers())
            );
            emit(config.success_level, &msg);
        }

        async move {
            let result = self.inner.execute(request).await;
            match &result {
                Ok(response) => self.logger.finish_status(span, response.status().as_u16()),
                Err(e) => self.logger.finish_error(span, &e.to_string()),
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{MockResponse, MockTransport};

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Trace.to_string(), "TRACE");
        assert_eq!(LogLevel::Debug.to_string(), "DEBUG");
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
        assert_eq!(LogLevel::Off.to_string(), "OFF");
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::new()
            .with_success_level(LogLevel::Debug)
            .with_error_level(LogLevel::Warn)
            .with_headers(true)
            .with_path(false)
            .with_redaction(false)
            .with_sensitive_header("x-custom-auth");

        assert_eq!(config.success_level, LogLevel::Debug);
        assert_eq!(config.error_level, LogLevel::Warn);
        assert!(config.log_headers);
        assert!(!config.log_path);
        assert!(!config.redact_sensitive);
        assert!(config
            .sensitive_headers
            .contains(&"x-custom-auth".to_string()));
    }

    #[test]
    fn test_logging_config_presets() {
        let verbose = LoggingConfig::verbose();
        assert_eq!(verbose.success_level, LogLevel::Debug);
        assert!(verbose.log_headers);

        let quiet = LoggingConfig::quiet();
        assert_eq!(quiet.success_level, LogLevel::Off);
        assert_eq!(quiet.error_level, LogLevel::Warn);
    }

    #[test]
    fn test_header_redaction() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer secret".parse().unwrap());
        headers.insert("x-ms-version", "2015-04-01".parse().unwrap());

        let rendered = LoggingConfig::default().render_headers(&headers);
        assert!(rendered.contains("authorization=[REDACTED]"));
        assert!(rendered.contains("x-ms-version=\"2015-04-01\""));
        assert!(!rendered.contains("secret"));

        let unredacted = LoggingConfig::default()
            .with_redaction(false)
            .render_headers(&headers);
        assert!(unredacted.contains("secret"));
    }

    #[test]
    fn test_transport_metrics() {
        let metrics = TransportMetrics::new();
        assert_eq!(metrics.success_rate(), 1.0);

        metrics.record_success();
        metrics.record_success();
        metrics.record_failure();

        assert_eq!(metrics.total_requests(), 3);
        assert_eq!(metrics.successful_requests(), 2);
        assert_eq!(metrics.failed_requests(), 1);
        assert!((metrics.success_rate() - 0.666_666_666_666_666_6).abs() < 0.001);

        metrics.reset();
        assert_eq!(metrics.total_requests(), 0);
    }

    #[test]
    fn test_request_logger_counts_http_failures() {
        let logger = RequestLogger::with_config(LoggingConfig::quiet());
        logger.finish_status(logger.start("GET", "/services/disks"), 200);
        logger.finish_status(logger.start("GET", "/services/disks"), 500);

        assert_eq!(logger.metrics().successful_requests(), 1);
        assert_eq!(logger.metrics().failed_requests(), 1);
    }

    #[tokio::test]
    async fn test_logging_transport_delegates() {
        let transport = LoggingTransport::with_config(
            MockTransport::new().with_route("GET", "/a", MockResponse::ok("x")),
            LoggingConfig::verbose(),
        );

        let ok = Request::get("https://example.test/a")
            .header("authorization", "secret")
            .body(Bytes::new())
            .unwrap();
        let response = transport.execute(ok).await.unwrap();
        assert_eq!(response.body().as_ref(), b"x");

        let missing = Request::get("https://example.test/b")
            .body(Bytes::new())
            .unwrap();
        assert!(transport.execute(missing).await.is_err());

        let metrics = transport.logger().metrics();
        assert_eq!(metrics.successful_requests(), 1);
        assert_eq!(metrics.failed_requests(), 1);
        assert_eq!(transport.inner().requests().len(), 2);
    }
}
