// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions from element text to typed values.
//!
//! Enum lookups are total: text that matches no declared label maps to the
//! `Unrecognized` variant. Timestamps, URIs and base64 payloads are strict and
//! fail the parse when they do not conform.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use url::Url;

use crate::error::{CloudError, Result};

const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const SECONDS_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An enum decoded from element text.
pub trait XmlEnum: Sized + Copy + 'static {
    /// Declared variants, excluding the `Unrecognized` sentinel.
    const VARIANTS: &'static [Self];

    /// Exact, case-sensitive lookup. Never fails.
    fn from_value(value: &str) -> Self;

    /// Wire label of the variant.
    fn as_str(&self) -> &'static str;

    /// Whether the value matched a declared label.
    fn is_recognized(&self) -> bool;
}

/// Declares an enum with wire labels and an `Unrecognized` sentinel.
macro_rules! xml_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// Value not known to this version of the library.
            Unrecognized,
        }

        impl $crate::xml::XmlEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn from_value(value: &str) -> Self {
                match value {
                    $($label => Self::$variant,)+
                    _ => Self::Unrecognized,
                }
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Unrecognized => "UNRECOGNIZED",
                }
            }

            fn is_recognized(&self) -> bool {
                !matches!(self, Self::Unrecognized)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::xml::XmlEnum::as_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(<Self as $crate::xml::XmlEnum>::from_value(value))
            }
        }
    };
}

pub(crate) use xml_enum;

/// Accepted timestamp layout for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// ISO-8601 with seconds precision and a `Z` or `+hh:mm` offset.
    #[default]
    Seconds,
    /// ISO-8601 with optional fractional seconds, a bare date, or the
    /// seconds layout as a fallback.
    DateOrSeconds,
}

/// Parse a timestamp with the given policy.
///
/// # Errors
///
/// Returns [`CloudError::InvalidTimestamp`] when the text matches no accepted layout.
pub fn parse_timestamp(
    field: &'static str,
    value: &str,
    format: TimestampFormat,
) -> Result<DateTime<Utc>> {
    let parsed = match format {
        TimestampFormat::Seconds => parse_seconds(value),
        TimestampFormat::DateOrSeconds => DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|date| date.with_timezone(&Utc))
            .or_else(|| parse_date(value))
            .or_else(|| parse_seconds(value)),
    };
    parsed.ok_or_else(|| CloudError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

fn parse_seconds(value: &str) -> Option<DateTime<Utc>> {
    if let Some(naive) = value.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(naive, SECONDS_FORMAT)
            .ok()
            .map(|naive| naive.and_utc());
    }
    DateTime::parse_from_str(value, SECONDS_OFFSET_FORMAT)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse an absolute URI.
///
/// # Errors
///
/// Returns [`CloudError::InvalidUri`] for relative or malformed text.
pub fn parse_uri(field: &'static str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|source| CloudError::InvalidUri {
        field,
        value: value.to_string(),
        source,
    })
}

/// Decode a base64 encoded UTF-8 string.
///
/// # Errors
///
/// Returns [`CloudError::InvalidValue`] when the text is not base64 or not UTF-8.
pub fn decode_base64(field: &'static str, value: &str) -> Result<String> {
    let invalid = |reason: String| CloudError::InvalidValue {
        field,
        value: value.to_string(),
        reason,
    };
    let bytes = STANDARD
        .decode(value)
        .map_err(|e| invalid(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| invalid(e.to_string()))
}

/// Encode a string as base64, the way Azure expects labels and custom data.
#[must_use]
pub fn encode_base64(value: &str) -> String {
    STANDARD.encode(value)
}
