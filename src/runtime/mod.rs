// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime utilities for observability.
//!
//! Retries, pooling and authentication belong to the caller's transport;
//! this module only decorates a transport with structured logging.

mod logging;

pub use logging::{
    LogLevel, LoggingConfig, LoggingTransport, RequestLogger, RequestSpan, TransportMetrics,
};
