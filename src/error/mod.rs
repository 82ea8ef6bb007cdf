// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::azure::Error as AzureError;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp in {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Invalid URI in {field}: {value:?}: {source}")]
    InvalidUri {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid value in {field}: {value:?} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Missing required field {field} in {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Provider returned HTTP {status}{}", describe(.error))]
    Provider {
        status: u16,
        error: Option<AzureError>,
        body: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request could not be built: {0}")]
    Request(#[from] http::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn describe(error: &Option<AzureError>) -> String {
    match error {
        Some(error) => format!(": {} ({})", error.message, error.code),
        None => String::new(),
    }
}

impl CloudError {
    /// HTTP status of a provider failure, if this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure means the response body broke the expected schema.
    #[must_use]
    pub fn is_malformed_document(&self) -> bool {
        matches!(
            self,
            Self::Xml { .. }
                | Self::UnexpectedRoot { .. }
                | Self::Json(_)
                | Self::InvalidTimestamp { .. }
                | Self::InvalidUri { .. }
                | Self::InvalidValue { .. }
                | Self::MissingField { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
