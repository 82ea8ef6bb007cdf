// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed clients for classic cloud provider APIs.
//!
//! Azure Service Management answers are XML and go through the schema
//! driven parser in [`xml`]. ProfitBricks, 1&1, Trove and Rackspace Auto
//! Scale answers are JSON and map through `serde`. Every facade sends its
//! requests through a caller supplied [`client::Transport`].

pub mod autoscale;
pub mod azure;
pub mod client;
pub mod config;
pub mod error;
pub mod oneandone;
pub mod profitbricks;
pub mod runtime;
pub mod testkit;
pub mod trove;
pub mod xml;

pub use azure::AzureComputeApi;
pub use client::{ApiClient, Call, ClientConfig, Transport};
pub use config::{CloudConfig, CloudContext, Provider};
pub use error::{CloudError, Result};
