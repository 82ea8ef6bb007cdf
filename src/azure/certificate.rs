// SPDX-License-Identifier: MIT OR Apache-2.0

use url::Url;

use crate::error::Result;
use crate::xml::{Field, FromRecord, Record, Schema, XmlCollection, XmlEntity};

const CERTIFICATE: Schema = Schema {
    name: "Certificate",
    fields: &[
        Field::text("CertificateUrl"),
        Field::text("Thumbprint"),
        Field::text("ThumbprintAlgorithm"),
        Field::text("Data"),
    ],
};

/// A certificate uploaded to a hosted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCertificate {
    pub url: Option<Url>,
    pub thumbprint: String,
    pub thumbprint_algorithm: Option<String>,
    /// Base64 encoded public part of the certificate.
    pub data: Option<String>,
}

impl FromRecord for ServiceCertificate {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            url: record.uri("CertificateUrl")?,
            thumbprint: record.required("Thumbprint")?,
            thumbprint_algorithm: record.string("ThumbprintAlgorithm"),
            data: record.string("Data"),
        })
    }
}

impl XmlEntity for ServiceCertificate {
    const SCHEMA: &'static Schema = &CERTIFICATE;
}

impl XmlCollection for ServiceCertificate {
    const COLLECTION: &'static str = "Certificates";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse, parse_list};

    #[test]
    fn test_parse_certificates_fixture() {
        let certificates: Vec<ServiceCertificate> =
            parse_list(include_bytes!("../../tests/fixtures/azure/certificates.xml")).unwrap();
        assert_eq!(
            certificates,
            vec![ServiceCertificate {
                url: Some(
                    Url::parse(
                        "https://management.core.windows.net/1234/services/hostedservices/neotys/certificates/sha1-C3C9A5DF4E2D2B5B2F9E40E65D0E0A1E5A6D8E7F"
                    )
                    .unwrap()
                ),
                thumbprint: "C3C9A5DF4E2D2B5B2F9E40E65D0E0A1E5A6D8E7F".to_string(),
                thumbprint_algorithm: Some("sha1".to_string()),
                data: Some("MIIDEDCCAfigAwIBAgIQ".to_string()),
            }]
        );
    }

    #[test]
    fn test_certificate_without_thumbprint_is_error() {
        assert!(parse::<ServiceCertificate>(b"<Certificate><Data>AA==</Data></Certificate>").is_err());
    }
}
