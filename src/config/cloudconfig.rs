// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account configuration file parser
//!
//! The file (typically `~/.cloudlabs/config`) holds one context per provider
//! account. Each context names its provider and endpoint; Azure contexts add
//! a subscription id.
//!
//! # Example
//!
//! ```no_run
//! use cloudlabs_api_rs::config::CloudConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CloudConfig::load_default()?;
//!
//! if let Some(ctx) = config.active_context() {
//!     println!("Provider {} at {}", ctx.provider, ctx.endpoint);
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CloudError, Result};

/// Path of the configuration file.
pub const ENV_CLOUDLABS_CONFIG: &str = "CLOUDLABS_CONFIG";
/// Name of the context to activate.
pub const ENV_CLOUDLABS_CONTEXT: &str = "CLOUDLABS_CONTEXT";
/// Endpoint of the active context.
pub const ENV_CLOUDLABS_ENDPOINT: &str = "CLOUDLABS_ENDPOINT";

/// Represents the entire configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloudConfig {
    /// The currently active context name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Map of context names to their configurations
    pub contexts: HashMap<String, CloudContext>,
}

/// Provider family a context talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Azure,
    ProfitBricks,
    OneAndOne,
    Trove,
    Autoscale,
}

impl Provider {
    /// Header a configured token is sent in.
    #[must_use]
    pub fn token_header(&self) -> &'static str {
        match self {
            Provider::Azure => "authorization",
            Provider::ProfitBricks => "authorization",
            Provider::OneAndOne => "x-token",
            Provider::Trove | Provider::Autoscale => "x-auth-token",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Azure => write!(f, "azure"),
            Provider::ProfitBricks => write!(f, "profitbricks"),
            Provider::OneAndOne => write!(f, "oneandone"),
            Provider::Trove => write!(f, "trove"),
            Provider::Autoscale => write!(f, "autoscale"),
        }
    }
}

/// Configuration for a single provider account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloudContext {
    pub provider: Provider,

    /// Base URL of the provider API
    pub endpoint: String,

    /// Azure subscription the management endpoint is scoped to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,

    /// Overrides the default `x-ms-version`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Pre-issued credential handed to the transport as a header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CloudConfig {
    /// Load configuration from the default location (~/.cloudlabs/config)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The home directory cannot be determined
    /// - The config file cannot be read
    /// - The config file is malformed
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from `CLOUDLABS_CONFIG` (or the default path) and
    /// apply the `CLOUDLABS_CONTEXT` and `CLOUDLABS_ENDPOINT` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load_from_path(Self::config_path()?)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is malformed YAML
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CloudError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| CloudError::Config(format!("Failed to parse config YAML: {}", e)))
    }

    /// Serialize configuration back to YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CloudError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Get the default config file path (~/.cloudlabs/config)
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CloudError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".cloudlabs").join("config"))
    }

    /// Get the path to the config file, respecting `CLOUDLABS_CONFIG`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined when
    /// `CLOUDLABS_CONFIG` is not set
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var(ENV_CLOUDLABS_CONFIG) {
            Ok(PathBuf::from(env_path))
        } else {
            Self::default_path()
        }
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(context) = lookup(ENV_CLOUDLABS_CONTEXT).filter(|c| !c.is_empty()) {
            self.context = Some(context);
        }
        if let Some(endpoint) = lookup(ENV_CLOUDLABS_ENDPOINT).filter(|e| !e.is_empty()) {
            if let Some(ctx) = self
                .context
                .as_ref()
                .and_then(|name| self.contexts.get_mut(name))
            {
                ctx.endpoint = endpoint;
            }
        }
    }

    /// Get the currently active context
    ///
    /// Returns `None` if no active context is set or if the context doesn't exist
    pub fn active_context(&self) -> Option<&CloudContext> {
        self.context
            .as_ref()
            .and_then(|name| self.contexts.get(name))
    }

    /// Get a context by name
    pub fn get_context(&self, name: &str) -> Option<&CloudContext> {
        self.contexts.get(name)
    }

    /// List all available context names
    pub fn context_names(&self) -> Vec<&String> {
        self.contexts.keys().collect()
    }
}
