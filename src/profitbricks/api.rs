// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::de::DeserializeOwned;

use super::{Collection, DataCenter, DataCenterParams, Server};
use crate::client::{parse_json, to_json, ApiClient, Call, ClientConfig, Transport};
use crate::error::Result;

/// Data centers and servers of one ProfitBricks account.
#[derive(Debug)]
pub struct ProfitBricksApi<T> {
    client: ApiClient<T>,
}

fn items<R: DeserializeOwned>(body: &[u8]) -> Result<Vec<R>> {
    Ok(parse_json::<Collection<R>>(body)?.items)
}

impl<T: Transport> ProfitBricksApi<T> {
    /// `config` points at the Cloud API root, for example
    /// `https://api.profitbricks.com/cloudapi/v3`.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            client: ApiClient::new(transport, config),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    // ========================================================================
    // Data centers
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_data_centers(&self) -> Result<Vec<DataCenter>> {
        let call = Call::get(&["datacenters"]).with_query("depth", "1");
        self.client.list_or_empty(&call, items::<DataCenter>).await
    }

    /// A data center with its servers and volumes expanded.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get_data_center(&self, id: &str) -> Result<Option<DataCenter>> {
        let call = Call::get(&["datacenters", id]).with_query("depth", "2");
        self.client.get_or_none(&call, parse_json::<DataCenter>).await
    }

    /// Create a data center; the answer is the provisioning resource.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn create_data_center(&self, params: &DataCenterParams) -> Result<DataCenter> {
        let call = Call::post(&["datacenters"]).with_json(to_json(params)?);
        self.client.fetch(&call, parse_json::<DataCenter>).await
    }

    /// `false` when the data center does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any other provider fault.
    pub async fn delete_data_center(&self, id: &str) -> Result<bool> {
        self.client.succeeded(&Call::delete(&["datacenters", id])).await
    }

    // ========================================================================
    // Servers
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_servers(&self, data_center: &str) -> Result<Vec<Server>> {
        let call = Call::get(&["datacenters", data_center, "servers"]).with_query("depth", "1");
        self.client.list_or_empty(&call, items::<Server>).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get_server(&self, data_center: &str, id: &str) -> Result<Option<Server>> {
        let call =
            Call::get(&["datacenters", data_center, "servers", id]).with_query("depth", "1");
        self.client.get_or_none(&call, parse_json::<Server>).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn start_server(&self, data_center: &str, id: &str) -> Result<bool> {
        self.server_action(data_center, id, "start").await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn stop_server(&self, data_center: &str, id: &str) -> Result<bool> {
        self.server_action(data_center, id, "stop").await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn reboot_server(&self, data_center: &str, id: &str) -> Result<bool> {
        self.server_action(data_center, id, "reboot").await
    }

    async fn server_action(&self, data_center: &str, id: &str, action: &str) -> Result<bool> {
        let call = Call::post(&["datacenters", data_center, "servers", id, action]);
        self.client.succeeded(&call).await
    }
}
