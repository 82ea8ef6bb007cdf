// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::xml::{xml_enum, Field, FromRecord, Record, Schema, XmlEntity};

xml_enum! {
    /// Fault codes of the Service Management API.
    pub enum ErrorCode {
        MissingOrIncorrectVersionHeader => "MissingOrIncorrectVersionHeader",
        InvalidRequest => "InvalidRequest",
        InvalidXmlRequest => "InvalidXmlRequest",
        InvalidQueryParameterValue => "InvalidQueryParameterValue",
        MissingOrInvalidRequiredQueryParameter => "MissingOrInvalidRequiredQueryParameter",
        InvalidHttpVerb => "InvalidHttpVerb",
        InternalError => "InternalError",
        BadRequest => "BadRequest",
        AuthenticationFailed => "AuthenticationFailed",
        ResourceNotFound => "ResourceNotFound",
        SubscriptionDisabled => "SubscriptionDisabled",
        ServerBusy => "ServerBusy",
        TooManyRequests => "TooManyRequests",
        ConflictError => "ConflictError",
    }
}

pub(crate) const ERROR: Schema = Schema {
    name: "Error",
    fields: &[Field::text("Code"), Field::text("Message")],
};

/// A fault reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl FromRecord for Error {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            code: record
                .enumeration("Code")
                .unwrap_or(ErrorCode::Unrecognized),
            message: record.string("Message").unwrap_or_default(),
        })
    }
}

impl XmlEntity for Error {
    const SCHEMA: &'static Schema = &ERROR;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse, XmlEnum};

    #[test]
    fn test_parse_error_fixture() {
        let error: Error = parse(include_bytes!("../../tests/fixtures/azure/error.xml")).unwrap();
        assert_eq!(
            error,
            Error {
                code: ErrorCode::MissingOrInvalidRequiredQueryParameter,
                message: "A required query parameter was not specified for this request or was specified incorrectly.".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_code() {
        let error: Error =
            parse(b"<Error><Code>QuotaExceeded</Code><Message>m</Message></Error>").unwrap();
        assert_eq!(error.code, ErrorCode::Unrecognized);
        assert_eq!(error.code.as_str(), "UNRECOGNIZED");
    }
}
