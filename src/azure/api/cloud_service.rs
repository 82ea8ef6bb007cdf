// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::azure::{Availability, CloudService, CloudServiceParams, CloudServiceProperties};
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

const HOSTED_SERVICES: &str = "hostedservices";

/// Hosted (cloud) services of the subscription.
#[derive(Debug)]
pub struct CloudServiceApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> CloudServiceApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// All hosted services; empty on 404.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<CloudService>> {
        self.client
            .list_or_empty(
                &Call::get(&["services", HOSTED_SERVICES]),
                xml::parse_list::<CloudService>,
            )
            .await
    }

    /// A hosted service with its deployments (`embed-detail=true`), or
    /// `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, name: &str) -> Result<Option<CloudServiceProperties>> {
        let call =
            Call::get(&["services", HOSTED_SERVICES, name]).with_query("embed-detail", "true");
        self.client
            .get_or_none(&call, xml::parse::<CloudServiceProperties>)
            .await
    }

    /// Create a hosted service; returns the request id.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault, for example a name conflict.
    pub async fn create(&self, params: &CloudServiceParams) -> Result<String> {
        let call = Call::post(&["services", HOSTED_SERVICES]).with_xml(params.to_xml()?);
        self.client.accepted(&call).await
    }

    /// Delete a hosted service and the media of its deployments. `None` if
    /// it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        let call = Call::delete(&["services", HOSTED_SERVICES, name]).with_query("comp", "media");
        self.client.accepted_or_none(&call).await
    }

    /// Whether a service name is still free.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn available(&self, name: &str) -> Result<Availability> {
        let call = Call::get(&["services", HOSTED_SERVICES, "operations", "isavailable", name]);
        self.client.fetch(&call, xml::parse::<Availability>).await
    }
}
