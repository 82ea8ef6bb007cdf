// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST operations of the Service Management API.
//!
//! [`AzureComputeApi`] owns an [`ApiClient`] configured for one subscription
//! and hands out borrowed sub-APIs per resource family. Each operation maps
//! the HTTP answer onto its documented fallback: lookups return `None` on
//! 404, lists return an empty vector on 404, and asynchronous operations
//! return the `x-ms-request-id` of the accepted request.
//!
//! ```no_run
//! use cloudlabs_api_rs::azure::AzureComputeApi;
//! use cloudlabs_api_rs::client::{ClientConfig, Transport};
//!
//! # async fn example<T: Transport>(transport: T) -> cloudlabs_api_rs::Result<()> {
//! let api = AzureComputeApi::new(transport, ClientConfig::azure("my-subscription")?);
//! for service in api.cloud_services().list().await? {
//!     println!("{} in {:?}", service.name, service.location);
//! }
//! # Ok(())
//! # }
//! ```

mod certificate;
mod cloud_service;
mod deployment;
mod image;
mod network;
mod storage;
mod traffic_manager;
mod virtual_machine;

pub use certificate::ServiceCertificateApi;
pub use cloud_service::CloudServiceApi;
pub use deployment::DeploymentApi;
pub use image::{DiskApi, OSImageApi, VMImageApi};
pub use network::{NetworkSecurityGroupApi, ReservedIPAddressApi, VirtualNetworkApi};
pub use storage::{AffinityGroupApi, StorageAccountApi};
pub use traffic_manager::TrafficManagerApi;
pub use virtual_machine::VirtualMachineApi;

use super::{Location, Operation, RoleSize};
use crate::client::{ApiClient, Call, ClientConfig, Transport};
use crate::error::Result;
use crate::xml;

/// Entry point to the compute operations of one subscription.
#[derive(Debug)]
pub struct AzureComputeApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> AzureComputeApi<T> {
    /// Build the API over a transport. `config` is usually
    /// [`ClientConfig::azure`].
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self::from_client(ApiClient::new(transport, config))
    }

    pub fn from_client(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn cloud_services(&self) -> CloudServiceApi<'_, T> {
        CloudServiceApi::new(&self.client)
    }

    /// Deployments of one hosted service.
    pub fn deployments<'a>(&'a self, service: &'a str) -> DeploymentApi<'a, T> {
        DeploymentApi::new(&self.client, service)
    }

    /// Virtual machine roles of one deployment.
    pub fn virtual_machines<'a>(
        &'a self,
        service: &'a str,
        deployment: &'a str,
    ) -> VirtualMachineApi<'a, T> {
        VirtualMachineApi::new(&self.client, service, deployment)
    }

    pub fn disks(&self) -> DiskApi<'_, T> {
        DiskApi::new(&self.client)
    }

    pub fn os_images(&self) -> OSImageApi<'_, T> {
        OSImageApi::new(&self.client)
    }

    pub fn vm_images(&self) -> VMImageApi<'_, T> {
        VMImageApi::new(&self.client)
    }

    pub fn storage_accounts(&self) -> StorageAccountApi<'_, T> {
        StorageAccountApi::new(&self.client)
    }

    pub fn affinity_groups(&self) -> AffinityGroupApi<'_, T> {
        AffinityGroupApi::new(&self.client)
    }

    pub fn reserved_ips(&self) -> ReservedIPAddressApi<'_, T> {
        ReservedIPAddressApi::new(&self.client)
    }

    pub fn network_security_groups(&self) -> NetworkSecurityGroupApi<'_, T> {
        NetworkSecurityGroupApi::new(&self.client)
    }

    pub fn virtual_networks(&self) -> VirtualNetworkApi<'_, T> {
        VirtualNetworkApi::new(&self.client)
    }

    /// Certificates uploaded to one hosted service.
    pub fn service_certificates<'a>(&'a self, service: &'a str) -> ServiceCertificateApi<'a, T> {
        ServiceCertificateApi::new(&self.client, service)
    }

    pub fn traffic_manager(&self) -> TrafficManagerApi<'_, T> {
        TrafficManagerApi::new(&self.client)
    }

    /// Data center regions available to the subscription.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.client
            .list_or_empty(&Call::get(&["locations"]), xml::parse_list::<Location>)
            .await
    }

    /// Role sizes the subscription may use.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_role_sizes(&self) -> Result<Vec<RoleSize>> {
        self.client
            .list_or_empty(&Call::get(&["rolesizes"]), xml::parse_list::<RoleSize>)
            .await
    }

    /// Status of an asynchronous request, by the id returned when it was
    /// accepted. `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get_operation(&self, request_id: &str) -> Result<Option<Operation>> {
        self.client
            .get_or_none(&Call::get(&["operations", request_id]), xml::parse::<Operation>)
            .await
    }
}
