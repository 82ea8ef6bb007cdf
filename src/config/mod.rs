// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management for provider clients
//!
//! # Environment Variables
//!
//! - `CLOUDLABS_CONFIG` - Path to the config file (default: `~/.cloudlabs/config`)
//! - `CLOUDLABS_CONTEXT` - Override the active context
//! - `CLOUDLABS_ENDPOINT` - Override the endpoint of the active context
//!
//! # Example
//!
//! ```no_run
//! use cloudlabs_api_rs::client::ClientConfig;
//! use cloudlabs_api_rs::config::CloudConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CloudConfig::load_with_env()?;
//!
//! if let Some(ctx) = config.active_context() {
//!     let client_config = ClientConfig::from_context(ctx)?;
//!     println!("Using endpoint: {}", client_config.endpoint);
//! }
//! # Ok(())
//! # }
//! ```

mod cloudconfig;

pub use cloudconfig::{
    CloudConfig, CloudContext, Provider, ENV_CLOUDLABS_CONFIG, ENV_CLOUDLABS_CONTEXT,
    ENV_CLOUDLABS_ENDPOINT,
};
