// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::azure::{Deployment, DeploymentParams};
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

/// Deployments of one hosted service.
#[derive(Debug)]
pub struct DeploymentApi<'a, T> {
    client: &'a ApiClient<T>,
    service: &'a str,
}

impl<'a, T: Transport> DeploymentApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>, service: &'a str) -> Self {
        Self { client, service }
    }

    fn call(&self, method: fn(&[&str]) -> Call, name: Option<&str>) -> Call {
        match name {
            Some(name) => method(&["services", "hostedservices", self.service, "deployments", name]),
            None => method(&["services", "hostedservices", self.service, "deployments"]),
        }
    }

    /// A deployment by name, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, name: &str) -> Result<Option<Deployment>> {
        self.client
            .get_or_none(&self.call(Call::get, Some(name)), xml::parse::<Deployment>)
            .await
    }

    /// Create a deployment with one virtual machine; returns the request id.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is invalid or on a provider fault.
    pub async fn create(&self, params: &DeploymentParams) -> Result<String> {
        let call = self.call(Call::post, None).with_xml(params.to_xml()?);
        self.client.accepted(&call).await
    }

    /// Delete a deployment together with its disks and VHD blobs. `None` if
    /// it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        let call = self.call(Call::delete, Some(name)).with_query("comp", "media");
        self.client.accepted_or_none(&call).await
    }
}
