// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::azure::ServiceCertificate;
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

/// Certificates uploaded to one hosted service.
#[derive(Debug)]
pub struct ServiceCertificateApi<'a, T> {
    client: &'a ApiClient<T>,
    service: &'a str,
}

impl<'a, T: Transport> ServiceCertificateApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>, service: &'a str) -> Self {
        Self { client, service }
    }

    fn call(&self, method: fn(&[&str]) -> Call, certificate: Option<&str>) -> Call {
        match certificate {
            Some(id) => method(&["services", "hostedservices", self.service, "certificates", id]),
            None => method(&["services", "hostedservices", self.service, "certificates"]),
        }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<ServiceCertificate>> {
        self.client
            .list_or_empty(&self.call(Call::get, None), xml::parse_list::<ServiceCertificate>)
            .await
    }

    /// A certificate by thumbprint, for example `("sha1", "C3C9...")`.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(
        &self,
        algorithm: &str,
        thumbprint: &str,
    ) -> Result<Option<ServiceCertificate>> {
        let id = format!("{algorithm}-{thumbprint}");
        self.client
            .get_or_none(&self.call(Call::get, Some(id.as_str())), xml::parse::<ServiceCertificate>)
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, algorithm: &str, thumbprint: &str) -> Result<Option<String>> {
        let id = format!("{algorithm}-{thumbprint}");
        self.client
            .accepted_or_none(&self.call(Call::delete, Some(id.as_str())))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::azure::api::testing::api;
    use crate::testkit::{MockResponse, MockTransport};

    const THUMBPRINT: &str = "C3C9A5DF4E2D2B5B2F9E40E65D0E0A1E5A6D8E7F";

    #[tokio::test]
    async fn test_certificates() {
        let base = "/1234/services/hostedservices/neotys/certificates";
        let api = api(
            MockTransport::new()
                .with_route(
                    "GET",
                    base,
                    MockResponse::ok(
                        &include_bytes!("../../../tests/fixtures/azure/certificates.xml")[..],
                    ),
                )
                .with_route(
                    "GET",
                    &format!("{base}/sha1-{THUMBPRINT}"),
                    MockResponse::ok(
                        "<Certificate xmlns=\"http://schemas.microsoft.com/windowsazure\">\
                         <Thumbprint>C3C9A5DF4E2D2B5B2F9E40E65D0E0A1E5A6D8E7F</Thumbprint>\
                         <ThumbprintAlgorithm>sha1</ThumbprintAlgorithm>\
                         <Data>MIIDEDCCAfigAwIBAgIQ</Data></Certificate>",
                    ),
                )
                .with_route(
                    "DELETE",
                    &format!("{base}/sha1-{THUMBPRINT}"),
                    MockResponse::accepted("del"),
                )
                .with_route(
                    "GET",
                    &format!("{base}/sha1-unknown"),
                    MockResponse::status(404),
                ),
        );
        let certificates = api.service_certificates("neotys");
        assert_eq!(certificates.list().await.unwrap().len(), 1);

        let certificate = certificates.get("sha1", THUMBPRINT).await.unwrap().unwrap();
        assert_eq!(certificate.thumbprint, THUMBPRINT);
        assert!(certificate.url.is_none());
        assert!(certificates.get("sha1", "unknown").await.unwrap().is_none());

        assert_eq!(
            certificates.delete("sha1", THUMBPRINT).await.unwrap().as_deref(),
            Some("del")
        );
    }
}
