// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage accounts and affinity groups.

use crate::azure::{
    AffinityGroup, AffinityGroupParams, Availability, StorageService, StorageServiceKeys,
    StorageServiceParams,
};
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

const STORAGE_SERVICES: &str = "storageservices";

/// Storage accounts of the subscription.
#[derive(Debug)]
pub struct StorageAccountApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> StorageAccountApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<StorageService>> {
        self.client
            .list_or_empty(
                &Call::get(&["services", STORAGE_SERVICES]),
                xml::parse_list::<StorageService>,
            )
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, name: &str) -> Result<Option<StorageService>> {
        self.client
            .get_or_none(
                &Call::get(&["services", STORAGE_SERVICES, name]),
                xml::parse::<StorageService>,
            )
            .await
    }

    /// Primary and secondary access keys, or `None` if the account does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn keys(&self, name: &str) -> Result<Option<StorageServiceKeys>> {
        self.client
            .get_or_none(
                &Call::get(&["services", STORAGE_SERVICES, name, "keys"]),
                xml::parse::<StorageServiceKeys>,
            )
            .await
    }

    /// Create a storage account; returns the request id.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is invalid or on a provider fault.
    pub async fn create(&self, params: &StorageServiceParams) -> Result<String> {
        let call = Call::post(&["services", STORAGE_SERVICES]).with_xml(params.to_xml()?);
        self.client.accepted(&call).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        self.client
            .accepted_or_none(&Call::delete(&["services", STORAGE_SERVICES, name]))
            .await
    }

    /// Whether a storage account name is still free.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn available(&self, name: &str) -> Result<Availability> {
        let call = Call::get(&["services", STORAGE_SERVICES, "operations", "isavailable", name]);
        self.client.fetch(&call, xml::parse::<Availability>).await
    }
}

/// Affinity groups of the subscription.
#[derive(Debug)]
pub struct AffinityGroupApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AffinityGroupApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<AffinityGroup>> {
        self.client
            .list_or_empty(&Call::get(&["affinitygroups"]), xml::parse_list::<AffinityGroup>)
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, name: &str) -> Result<Option<AffinityGroup>> {
        self.client
            .get_or_none(&Call::get(&["affinitygroups", name]), xml::parse::<AffinityGroup>)
            .await
    }

    /// Create an affinity group; returns the request id.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn create(&self, params: &AffinityGroupParams) -> Result<String> {
        let call = Call::post(&["affinitygroups"]).with_xml(params.to_xml()?);
        self.client.accepted(&call).await
    }

    /// Delete an empty affinity group. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        self.client
            .accepted_or_none(&Call::delete(&["affinitygroups", name]))
            .await
    }
}
